use crate::lead::form::FormConfig;

#[cfg(debug_assertions)]
pub fn get_leads_endpoint() -> &'static str {
    "http://localhost:3001/leads" // Development sink when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_leads_endpoint() -> &'static str {
    // Apps Script web app backing the leads spreadsheet
    "https://script.google.com/macros/s/AKfycbw2mVrQh8dJp4kXoT1eLgNnQf5sYcUvHaRz7iBmWx0D3qtE9/exec"
}

/// Canonical validation ruleset for the live form. Terms acceptance stays
/// off here; flip `require_terms` for campaigns that need the checkbox.
pub fn form_config() -> FormConfig {
    FormConfig {
        min_name_len: 2,
        min_phone_len: 10,
        require_terms: false,
    }
}
