use crate::models::Slot;
use crate::views::format::format_amount;

pub const DEFAULT_DURATION_HOURS: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSlot {
    pub id: String,
    pub number: String,
    pub rate: f64,
    pub slot_type: String,
}

impl From<&Slot> for SelectedSlot {
    fn from(slot: &Slot) -> Self {
        Self {
            id: slot.id.clone(),
            number: slot.slot_number.clone(),
            rate: slot.hourly_rate,
            slot_type: slot.slot_type.clone(),
        }
    }
}

/// The slot a user has picked on the booking form and the requested duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub slot: Option<SelectedSlot>,
    pub duration: i64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            slot: None,
            duration: DEFAULT_DURATION_HOURS,
        }
    }
}

impl Selection {
    /// `rate × duration`, or 0 with no slot selected or a non-positive duration.
    pub fn total(&self) -> f64 {
        match &self.slot {
            Some(slot) if self.duration > 0 => slot.rate * self.duration as f64,
            _ => 0.0,
        }
    }

    pub fn summary(&self) -> BookingSummary {
        let slot_label = match &self.slot {
            Some(slot) => format!("{} ({})", slot.number, slot.slot_type),
            None => "None".to_string(),
        };
        let plural = if self.duration == 1 { "" } else { "s" };

        BookingSummary {
            slot_label,
            duration_label: format!("{} hour{plural}", self.duration),
            total_label: format_amount(self.total()),
            can_submit: self.slot.is_some(),
        }
    }
}

/// Display strings for the booking summary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub slot_label: String,
    pub duration_label: String,
    pub total_label: String,
    pub can_submit: bool,
}

/// Parses the duration field; anything that is not an integer counts as 0.
pub fn parse_duration(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_slot(rate: f64) -> SelectedSlot {
        SelectedSlot {
            id: "s1".to_string(),
            number: "A1".to_string(),
            rate,
            slot_type: "car".to_string(),
        }
    }

    #[test]
    fn total_is_rate_times_duration() {
        let selection = Selection {
            slot: Some(car_slot(50.0)),
            duration: 3,
        };
        assert_eq!(selection.total(), 150.0);
        assert_eq!(selection.summary().total_label, "150");
    }

    #[test]
    fn total_is_zero_without_selection_or_duration() {
        let none = Selection {
            slot: None,
            duration: 5,
        };
        assert_eq!(none.total(), 0.0);

        let zero = Selection {
            slot: Some(car_slot(50.0)),
            duration: 0,
        };
        assert_eq!(zero.total(), 0.0);

        let negative = Selection {
            slot: Some(car_slot(50.0)),
            duration: -2,
        };
        assert_eq!(negative.total(), 0.0);
    }

    #[test]
    fn summary_labels() {
        let mut selection = Selection::default();
        let summary = selection.summary();
        assert_eq!(summary.slot_label, "None");
        assert_eq!(summary.duration_label, "1 hour");
        assert!(!summary.can_submit);

        selection.slot = Some(car_slot(12.5));
        selection.duration = 2;
        let summary = selection.summary();
        assert_eq!(summary.slot_label, "A1 (car)");
        assert_eq!(summary.duration_label, "2 hours");
        assert_eq!(summary.total_label, "25");
        assert!(summary.can_submit);
    }

    #[test]
    fn unparseable_duration_counts_as_zero() {
        assert_eq!(parse_duration("4"), 4);
        assert_eq!(parse_duration(" 7 "), 7);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("two"), 0);
    }
}
