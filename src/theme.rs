use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Corporate palette
// ---------------------------------------------------------------------------

/// Availability / empty slots.
pub const EMPTY_BLUE: Color32 = Color32::from_rgb(0x0B, 0x72, 0xA4);
/// Physical occupancy.
pub const STORED_GREEN: Color32 = Color32::from_rgb(0x14, 0x85, 0x4B);
/// Alert: discrepancies and over-allocation.
pub const ALERT_RED: Color32 = Color32::from_rgb(0xB0, 0x3A, 0x43);

/// Raise the HSL lightness of a colour. Used to derive secondary chart
/// colours from the three base colours.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let srgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = srgb.into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Translucent fill for metric cards, `opacity` in `0.0..=1.0`.
pub fn tint(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity)
}

// ---------------------------------------------------------------------------
// Sign-dependent styling
//
// A balance is capacity minus stored count; negative means over-allocation.
// These are pure functions of the sign so the label/tone switching can be
// tested without any UI.
// ---------------------------------------------------------------------------

/// Card/slice colour for a balance value.
pub fn balance_color(balance: i64) -> Color32 {
    if balance >= 0 {
        EMPTY_BLUE
    } else {
        ALERT_RED
    }
}

/// Card title for a balance within the given scope (`"Total"`, `"0.75 m"`…).
pub fn balance_title(scope: &str, balance: i64) -> String {
    if balance >= 0 {
        format!("{scope} empty (balance)")
    } else {
        format!("{scope} over-allocation")
    }
}

/// Label of the non-stored donut slice.
pub fn remainder_label(balance: i64) -> &'static str {
    if balance >= 0 {
        "Empty"
    } else {
        "Over-allocation"
    }
}

/// Secondary line under the overview balance card: availability percentage
/// when there is room, over-allocation size when there is not.
pub fn balance_caption(balance: i64, capacity: u32) -> String {
    if balance >= 0 {
        let pct = if capacity > 0 {
            balance as f64 / f64::from(capacity) * 100.0
        } else {
            0.0
        };
        format!("{pct:.1}% available")
    } else {
        format!("over-allocation: {} slots", format_count(balance.abs()))
    }
}

/// Thousands-separated count, `.` as the separator (`4060` → `4.060`).
/// Negative values keep their sign.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_tone_flip_on_negative_balance() {
        assert_eq!(balance_color(0), EMPTY_BLUE);
        assert_eq!(balance_color(30), EMPTY_BLUE);
        assert_eq!(balance_color(-1), ALERT_RED);

        assert_eq!(balance_title("0.75 m", 30), "0.75 m empty (balance)");
        assert_eq!(balance_title("0.75 m", -70), "0.75 m over-allocation");

        assert_eq!(remainder_label(0), "Empty");
        assert_eq!(remainder_label(-40), "Over-allocation");
    }

    #[test]
    fn caption_shows_availability_or_excess() {
        assert_eq!(balance_caption(2030, 4060), "50.0% available");
        assert_eq!(balance_caption(0, 4060), "0.0% available");
        assert_eq!(balance_caption(-40, 4060), "over-allocation: 40 slots");
        // Guard against a zero capacity.
        assert_eq!(balance_caption(0, 0), "0.0% available");
    }

    #[test]
    fn counts_are_grouped_with_dots() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(751), "751");
        assert_eq!(format_count(4060), "4.060");
        assert_eq!(format_count(1_234_567), "1.234.567");
        assert_eq!(format_count(-751), "-751");
        assert_eq!(format_count(-4060), "-4.060");
    }

    #[test]
    fn lighten_raises_lightness() {
        let lighter = lighten(ALERT_RED, 0.15);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(lighter) > sum(ALERT_RED));
    }

    #[test]
    fn tint_is_translucent() {
        let t = tint(STORED_GREEN, 0.15);
        assert!(t.a() < STORED_GREEN.a());
    }
}
