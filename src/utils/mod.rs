// Shared request-shaping helpers.

/// Convert a decimal currency amount to integer minor units: multiply by
/// 100, round to two decimal places, then to the nearest whole unit.
pub fn to_minor_units(amount: f64) -> i64 {
    let cents = (amount * 100.0 * 100.0).round() / 100.0;
    cents.round() as i64
}

/// Settlement currency for a vendor country (ISO 3166-1 alpha-2).
pub fn currency_for_country(country: &str) -> Option<&'static str> {
    let currency = match country {
        "US" => "usd",
        "CA" => "cad",
        "GB" => "gbp",
        "AU" => "aud",
        "NZ" => "nzd",
        "SG" => "sgd",
        "HK" => "hkd",
        "JP" => "jpy",
        "IN" => "inr",
        "CH" => "chf",
        "DK" => "dkk",
        "NO" => "nok",
        "SE" => "sek",
        "AT" | "BE" | "DE" | "EE" | "ES" | "FI" | "FR" | "GR" | "IE" | "IT" | "LT" | "LU"
        | "LV" | "NL" | "PT" | "SI" | "SK" => "eur",
        _ => return None,
    };
    Some(currency)
}
