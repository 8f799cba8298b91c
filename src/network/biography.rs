use super::types::PersonRecord;

/// The fields a biography panel shows for a record; blanks are left out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Biography {
	pub name: String,
	/// Only set when it differs from `name`.
	pub birth_name: Option<String>,
	pub facts: Vec<(&'static str, String)>,
	pub photo: Option<String>,
	pub summary: Option<String>,
}

impl Biography {
	pub fn of(record: &PersonRecord) -> Self {
		let name = record.display_name().to_owned();
		let birth_name = record
			.birth_name
			.clone()
			.filter(|b| !b.is_empty() && *b != name);

		let facts = [
			("Role", Some(&record.role)),
			("Organization", Some(&record.organization)),
			("Era", Some(&record.era)),
			("Nickname", record.nickname.as_ref()),
		]
		.into_iter()
		.filter_map(|(label, value)| {
			value
				.filter(|v| !v.trim().is_empty())
				.map(|v| (label, v.clone()))
		})
		.collect();

		Self {
			name,
			birth_name,
			facts,
			photo: record.photo_path.clone(),
			summary: record.wikipedia_summary.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn omits_missing_fields() {
		let record = PersonRecord {
			id: "lansky".into(),
			name: "Meyer Lansky".into(),
			birth_name: Some("Meyer Lansky".into()),
			role: "Financier".into(),
			..PersonRecord::default()
		};
		let bio = Biography::of(&record);
		assert_eq!(bio.name, "Meyer Lansky");
		assert_eq!(bio.birth_name, None, "same as name");
		assert_eq!(bio.facts, vec![("Role", "Financier".to_owned())]);
		assert_eq!(bio.photo, None);
		assert_eq!(bio.summary, None);
	}

	#[test]
	fn shows_everything_present() {
		let record = PersonRecord {
			id: "siegel".into(),
			name: "Bugsy Siegel".into(),
			birth_name: Some("Benjamin Siegelbaum".into()),
			nickname: Some("Bugsy".into()),
			role: "Hitman".into(),
			organization: "Murder, Inc.".into(),
			era: "1920s-1947".into(),
			photo_path: Some("/photos/siegel.jpg".into()),
			wikipedia_summary: Some("American mobster.".into()),
			..PersonRecord::default()
		};
		let bio = Biography::of(&record);
		assert_eq!(bio.birth_name.as_deref(), Some("Benjamin Siegelbaum"));
		let labels: Vec<_> = bio.facts.iter().map(|(l, _)| *l).collect();
		assert_eq!(labels, ["Role", "Organization", "Era", "Nickname"]);
		assert_eq!(bio.photo.as_deref(), Some("/photos/siegel.jpg"));
	}
}
