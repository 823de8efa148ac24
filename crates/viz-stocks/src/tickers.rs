use crate::error::LookupError;

/// Company display names and their ticker symbols.
pub const TICKERS: [(&str, &str); 22] = [
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Google", "GOOGL"),
    ("Amazon", "AMZN"),
    ("Facebook", "META"),
    ("Tesla", "TSLA"),
    ("NVIDIA", "NVDA"),
    ("Netflix", "NFLX"),
    ("Intel", "INTC"),
    ("Adobe", "ADBE"),
    ("Alibaba", "BABA"),
    ("Cisco", "CSCO"),
    ("Disney", "DIS"),
    ("IBM", "IBM"),
    ("Johnson & Johnson", "JNJ"),
    ("McDonald's", "MCD"),
    ("Nike", "NKE"),
    ("Pfizer", "PFE"),
    ("Procter & Gamble", "PG"),
    ("Visa", "V"),
    ("Walmart", "WMT"),
    ("Exxon Mobil", "XOM"),
];

/// A company name as the user typed it, and the ticker it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub ticker: &'static str,
}

/// Upper-case the first letter of every run of letters, lower-case the rest,
/// and collapse whitespace, e.g.,
///     `"  exxon   MOBIL "`    -> `"Exxon Mobil"`
///     `"mcdonald's"`          -> `"Mcdonald'S"`
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut in_word = false;
    for (i, word) in name.split_whitespace().enumerate() {
        if i > 0 {
            titled.push(' ');
        }
        for c in word.chars() {
            if c.is_alphabetic() {
                if in_word {
                    titled.extend(c.to_lowercase());
                } else {
                    titled.extend(c.to_uppercase());
                }
                in_word = true;
            } else {
                titled.push(c);
                in_word = false;
            }
        }
        in_word = false;
    }
    titled
}

/// Look a single company name up in [`TICKERS`]; both sides are title-cased,
/// so the match ignores case and surrounding whitespace.
pub fn ticker_for(name: &str) -> Option<&'static str> {
    let key = title_case(name);
    TICKERS
        .iter()
        .find(|(company, _)| title_case(company) == key)
        .map(|(_, ticker)| *ticker)
}

/// Resolve comma-separated company names to tickers, in input order.
///
/// Blank entries are skipped. The first unknown name fails the whole lookup.
pub fn resolve(input: &str) -> Result<Vec<Company>, LookupError> {
    let companies = input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| match ticker_for(name) {
            Some(ticker) => Ok(Company {
                name: name.to_string(),
                ticker,
            }),
            None => Err(LookupError::InvalidCompany(name.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if companies.is_empty() {
        return Err(LookupError::NoInput);
    }
    Ok(companies)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
