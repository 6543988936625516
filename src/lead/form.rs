use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Property types offered in the enquiry form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PropertyType {
    Villa,
    Apartment,
    Penthouse,
    Townhouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Villa,
        PropertyType::Apartment,
        PropertyType::Penthouse,
        PropertyType::Townhouse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Villa => "Villa",
            PropertyType::Apartment => "Apartment",
            PropertyType::Penthouse => "Penthouse",
            PropertyType::Townhouse => "Townhouse",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == s)
    }
}

/// Budget bands offered in the enquiry form. Labels are the wire strings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BudgetBand {
    UnderHalfMillion,
    HalfToSevenHundred,
    SevenHundredAndAbove,
}

impl BudgetBand {
    pub const ALL: [BudgetBand; 3] = [
        BudgetBand::UnderHalfMillion,
        BudgetBand::HalfToSevenHundred,
        BudgetBand::SevenHundredAndAbove,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::UnderHalfMillion => "Under $500,000",
            BudgetBand::HalfToSevenHundred => "$500,000 - $700,000",
            BudgetBand::SevenHundredAndAbove => "$700,000 and Above",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == s)
    }
}

/// Raw form state, mutated on every keystroke/selection. Select fields hold
/// the option label; validation checks membership against the enums above.
#[derive(Clone, PartialEq, Default, Serialize)]
pub struct FormValues {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub looking_for: String,
    pub budget: String,
    pub terms: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Field {
    FullName,
    Phone,
    Email,
    LookingFor,
    Budget,
    Terms,
}

/// Validation thresholds and the terms-acceptance toggle. The two deployed
/// variants of this form disagreed on whether terms acceptance is required,
/// so it is a config knob rather than a hard-coded rule.
#[derive(Clone, Copy, PartialEq)]
pub struct FormConfig {
    pub min_name_len: usize,
    pub min_phone_len: usize,
    pub require_terms: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            min_phone_len: 10,
            require_terms: false,
        }
    }
}

/// Minimal address grammar: one `@`, non-empty local part, domain with a dot
/// that is neither first nor last, no whitespace anywhere.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1,
        None => false,
    }
}

/// Run the full ruleset. Absent key = valid field. Attribution parameters
/// never appear here; they are optional by definition.
pub fn validate(values: &FormValues, config: &FormConfig) -> HashMap<Field, String> {
    let mut errors = HashMap::new();

    let name = values.full_name.trim();
    if name.is_empty() {
        errors.insert(Field::FullName, "Full name is required".to_string());
    } else if name.chars().count() < config.min_name_len {
        errors.insert(
            Field::FullName,
            format!("Full name must be at least {} characters", config.min_name_len),
        );
    }

    if values.phone.is_empty() {
        errors.insert(Field::Phone, "Phone number is required".to_string());
    } else if values.phone.chars().count() < config.min_phone_len {
        errors.insert(
            Field::Phone,
            format!("Phone number must be at least {} digits", config.min_phone_len),
        );
    }

    let email = values.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, "Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, "Invalid email".to_string());
    }

    if PropertyType::parse(&values.looking_for).is_none() {
        errors.insert(
            Field::LookingFor,
            "Please select what you're looking for".to_string(),
        );
    }

    if BudgetBand::parse(&values.budget).is_none() {
        errors.insert(Field::Budget, "Please select your budget range".to_string());
    }

    if config.require_terms && !values.terms {
        errors.insert(Field::Terms, "You must accept the terms".to_string());
    }

    errors
}

/// Per-field touched flags plus the current error map. Recomputed on every
/// change, blur and submit attempt; errors only surface for touched fields.
#[derive(Clone, PartialEq, Default)]
pub struct ValidationState {
    touched: HashSet<Field>,
    errors: HashMap<Field, String>,
}

impl ValidationState {
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// A submit attempt surfaces every latent error.
    pub fn touch_all(&mut self) {
        for field in [
            Field::FullName,
            Field::Phone,
            Field::Email,
            Field::LookingFor,
            Field::Budget,
            Field::Terms,
        ] {
            self.touched.insert(field);
        }
    }

    pub fn recompute(&mut self, values: &FormValues, config: &FormConfig) {
        self.errors = validate(values, config);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error text to render for a field, only once the user has touched it.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(&field).map(String::as_str)
        } else {
            None
        }
    }
}
