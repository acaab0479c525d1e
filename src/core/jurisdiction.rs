const DEFAULT_NET_INCOME_FACTOR: f64 = 0.77;

const NET_INCOME_FACTORS: [(&str, f64); 12] = [
    ("ZG", 0.82),
    ("SZ", 0.81),
    ("NW", 0.81),
    ("AI", 0.80),
    ("LU", 0.79),
    ("ZH", 0.78),
    ("AG", 0.78),
    ("SG", 0.77),
    ("BS", 0.76),
    ("BE", 0.75),
    ("VD", 0.74),
    ("GE", 0.74),
];

pub fn normalize_tag(jurisdiction: &str) -> String {
    jurisdiction.trim().to_ascii_uppercase()
}

pub fn net_income_factor(jurisdiction: &str) -> f64 {
    let tag = normalize_tag(jurisdiction);
    NET_INCOME_FACTORS
        .iter()
        .find(|(code, _)| *code == tag)
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_NET_INCOME_FACTOR)
}
