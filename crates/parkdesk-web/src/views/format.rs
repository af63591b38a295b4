use chrono::FixedOffset;

use super::expiry::parse_timestamp;

/// Money as the pages show it: whole amounts without decimals.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}

/// Timestamps are shown as wall-clock time in the backend's zone.
pub fn format_datetime(raw: Option<&str>, zone: FixedOffset) -> String {
    match raw {
        Some(raw) => match parse_timestamp(raw, zone) {
            Some(dt) => dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
            None => raw.to_string(),
        },
        None => "N/A".to_string(),
    }
}

pub fn format_date(raw: Option<&str>, zone: FixedOffset) -> String {
    match raw {
        Some(raw) => match parse_timestamp(raw, zone) {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => raw.to_string(),
        },
        None => "N/A".to_string(),
    }
}

/// Leading characters of an identifier, as shown in compact tables.
pub fn short_id(id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("{short}...")
}

/// Image URLs are either absolute or made root-relative.
pub fn image_src(img: &str) -> String {
    if img.starts_with("http") || img.starts_with('/') {
        img.to_string()
    } else {
        format!("/{img}")
    }
}

pub fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts() {
        assert_eq!(format_amount(150.0), "150");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn datetimes() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(
            format_datetime(Some("2025-03-04T05:06:07"), ist),
            "04/03/2025, 05:06:07"
        );
        assert_eq!(
            format_datetime(Some("2025-03-04T05:06:07Z"), ist),
            "04/03/2025, 10:36:07"
        );
        assert_eq!(format_datetime(Some("whenever"), ist), "whenever");
        assert_eq!(format_datetime(None, ist), "N/A");
        assert_eq!(format_date(Some("2025-03-04T20:06:07Z"), ist), "05/03/2025");
    }

    #[test]
    fn short_ids_are_char_safe() {
        assert_eq!(short_id("65f0c0ffee1234"), "65f0c0ff...");
        assert_eq!(short_id("ab"), "ab...");
        assert_eq!(short_id("ééééééééé"), "éééééééé...");
    }

    #[test]
    fn image_sources() {
        assert_eq!(image_src("https://cdn/x.png"), "https://cdn/x.png");
        assert_eq!(image_src("/uploads/x.png"), "/uploads/x.png");
        assert_eq!(image_src("uploads/x.png"), "/uploads/x.png");
    }
}
