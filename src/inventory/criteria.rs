use serde::{Deserialize, Serialize};

/// User-edited filter state for the inventory browser.
///
/// Every field is kept as the raw string the user typed or selected; an empty
/// string means "any". Price bounds that do not parse as numbers are treated
/// as absent rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub make: String,
    pub model: String,
    pub min_price: String,
    pub max_price: String,
}

impl FilterCriteria {
    pub fn with_search_term(self, search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..self
        }
    }

    pub fn with_make(self, make: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            ..self
        }
    }

    pub fn with_model(self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self
        }
    }

    pub fn with_price_bounds(self, min_price: impl Into<String>, max_price: impl Into<String>) -> Self {
        Self {
            min_price: min_price.into(),
            max_price: max_price.into(),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn min_price_bound(&self) -> Option<f64> {
        parse_bound(&self.min_price)
    }

    pub fn max_price_bound(&self) -> Option<f64> {
        parse_bound(&self.max_price)
    }
}

// Reads the leading decimal number and ignores whatever follows it, so
// "30000abc" bounds at 30000. Spelled-out "inf"/"nan" are not numbers here.
fn parse_bound(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let prefix = &text[..numeric_prefix_len(text.as_bytes())];
    prefix.parse::<f64>().ok()
}

fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    // A lone sign or "." has no digits to read
    let has_digits = int_end > end || mantissa_end > int_end + 1;
    if !has_digits {
        return 0;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    end
}

/// A price bracket offered by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub label: &'static str,
    pub min: &'static str,
    pub max: &'static str,
}

pub const PRICE_RANGES: [PriceRange; 6] = [
    PriceRange { label: "Any Price", min: "", max: "" },
    PriceRange { label: "Under $50,000", min: "0", max: "49999" },
    PriceRange { label: "$50,000 - $99,999", min: "50000", max: "99999" },
    PriceRange { label: "$100,000 - $149,999", min: "100000", max: "149999" },
    PriceRange { label: "$150,000 - $199,999", min: "150000", max: "199999" },
    PriceRange { label: "Over $200,000", min: "200000", max: "" },
];
