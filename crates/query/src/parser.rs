use crate::types::Query;
use crate::vocab::{
    is_bare_variable, is_granularity, is_known_region, SCENARIO_PREFIX, VARIABLE_SEPARATOR,
};

/// Classification assigned to a single lower-cased token.
///
/// Rules are tried in declaration order and the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Scenario,
    PipedVariable,
    Region,
    Granularity,
    Year(i32),
    BareVariable,
    Unrecognized,
}

/// Classify one token. The token is expected to be lower-case already.
pub fn classify_token(token: &str) -> TokenClass {
    if is_scenario(token) {
        TokenClass::Scenario
    } else if token.contains(VARIABLE_SEPARATOR) {
        TokenClass::PipedVariable
    } else if is_known_region(token) {
        TokenClass::Region
    } else if is_granularity(token) {
        TokenClass::Granularity
    } else if let Some(year) = parse_year(token) {
        TokenClass::Year(year)
    } else if is_bare_variable(token) {
        TokenClass::BareVariable
    } else {
        TokenClass::Unrecognized
    }
}

/// Parse a free-text request into a [`Query`].
///
/// Never fails: tokens that match no rule are dropped. The first year token
/// fills `start_year`, the second `end_year`, later ones are ignored.
pub fn parse_query(text: &str) -> Query {
    let lowered = text.to_lowercase();
    let mut query = Query::default();

    for token in lowered.split_whitespace() {
        match classify_token(token) {
            TokenClass::Scenario => query.scenarios.push(token.to_uppercase()),
            TokenClass::PipedVariable | TokenClass::BareVariable => {
                query.variables.push(token.to_string())
            }
            TokenClass::Region => query.regions.push(capitalize(token)),
            TokenClass::Granularity => query.granularity = Some(token.to_string()),
            TokenClass::Year(year) => {
                if query.start_year.is_none() {
                    query.start_year = Some(year);
                } else if query.end_year.is_none() {
                    query.end_year = Some(year);
                } else {
                    tracing::trace!(token, "ignoring extra year token");
                }
            }
            TokenClass::Unrecognized => tracing::trace!(token, "dropping unrecognized token"),
        }
    }

    tracing::debug!(
        variables = query.variables.len(),
        regions = query.regions.len(),
        scenarios = query.scenarios.len(),
        granularity = ?query.granularity,
        start_year = ?query.start_year,
        end_year = ?query.end_year,
        "parsed query"
    );

    query
}

fn is_scenario(token: &str) -> bool {
    token
        .strip_prefix(SCENARIO_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// First character upper-cased, the rest lower-cased (`usa` -> `Usa`).
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
