use crate::error::RecordError;
use crate::source::TeamEntry;

/// One `organizations` row. `description` and `lore` are filled by a
/// separate enrichment step and are always empty here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationRow {
    pub id: String,
    pub name: String,
    pub org_type: Option<String>,
    pub description: Option<String>,
    pub lore: Option<String>,
    pub color: Option<String>,
    pub order_num: Option<i64>,
}

impl OrganizationRow {
    pub fn from_team(entry: &TeamEntry) -> Result<Self, RecordError> {
        let id = non_empty(entry.power_id.as_deref()).ok_or(RecordError::MissingField("powerId"))?;
        let name =
            non_empty(entry.power_name.as_deref()).ok_or(RecordError::MissingField("powerName"))?;

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            org_type: organization_type(entry.power_level).map(str::to_string),
            description: None,
            lore: None,
            color: entry.color.clone(),
            order_num: entry.order_num,
        })
    }
}

/// Nesting level in the team table: nations contain factions contain teams
pub fn organization_type(power_level: Option<i64>) -> Option<&'static str> {
    match power_level? {
        0 => Some("Nation"),
        1 => Some("Faction"),
        2 => Some("Team"),
        _ => None,
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_team() {
        let entry = TeamEntry {
            power_id: Some("penguin".into()),
            power_name: Some("ペンギン急便".into()),
            color: Some("ff4c4c".into()),
            order_num: Some(12),
            power_level: Some(1),
        };

        let row = OrganizationRow::from_team(&entry).unwrap();
        assert_eq!(row.id, "penguin");
        assert_eq!(row.org_type.as_deref(), Some("Faction"));
        assert_eq!(row.description, None);
        assert_eq!(row.lore, None);
        assert_eq!(row.order_num, Some(12));
    }

    #[test]
    fn test_missing_id_or_name() {
        let no_id = TeamEntry {
            power_name: Some("名前".into()),
            ..Default::default()
        };
        assert!(matches!(
            OrganizationRow::from_team(&no_id),
            Err(RecordError::MissingField("powerId"))
        ));

        let no_name = TeamEntry {
            power_id: Some("x".into()),
            power_name: Some("".into()),
            ..Default::default()
        };
        assert!(matches!(
            OrganizationRow::from_team(&no_name),
            Err(RecordError::MissingField("powerName"))
        ));
    }

    #[test]
    fn test_unknown_power_level_has_no_type() {
        assert_eq!(organization_type(Some(7)), None);
        assert_eq!(organization_type(None), None);
        assert_eq!(organization_type(Some(0)), Some("Nation"));
    }
}
