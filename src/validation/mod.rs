// ABOUTME: Per-step payload validation at the form-input trust boundary
// Raw JSON in, canonical typed payload or a field-path -> reason map out

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    AllocationData, BankingData, GoalData, IdentityData, IndiaBankAccount, OnboardingStep,
    StepPayload, TaxData, UsBankAccount,
};

lazy_static! {
    static ref SSN_RE: Regex = Regex::new(r"^\d{3}-\d{2}-\d{4}$").unwrap();
    static ref AADHAAR_RE: Regex = Regex::new(r"^\d{4} \d{4} \d{4}$").unwrap();
    static ref ROUTING_RE: Regex = Regex::new(r"^\d{9}$").unwrap();
    static ref IFSC_RE: Regex = Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap();
}

/// SSNs that match the format but are never issued
const SSN_BLACKLIST: &[&str] = &["000-00-0000"];

/// Map from field path (e.g. `usBank.routingNumber`) to a human-readable
/// reason. Every violated constraint gets an entry, not just the first.
pub type FieldErrors = BTreeMap<String, String>;

fn reject(errors: &mut FieldErrors, path: &str, reason: &str) {
    errors
        .entry(path.to_string())
        .or_insert_with(|| reason.to_string());
}

/// Pull a string field out of a raw object, recording an error if it is
/// missing, wrongly typed, or shorter than `min_len`.
fn string_field(
    raw: &Value,
    path: &str,
    min_len: usize,
    required_msg: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match raw.get(field_name(path)).and_then(Value::as_str) {
        Some(s) if s.len() >= min_len => Some(s.to_string()),
        _ => {
            reject(errors, path, required_msg);
            None
        }
    }
}

/// Pull a numeric field out of a raw object.
fn number_field(raw: &Value, path: &str, errors: &mut FieldErrors) -> Option<f64> {
    match raw.get(field_name(path)).and_then(Value::as_f64) {
        Some(n) => Some(n),
        None => {
            reject(errors, path, "Must be a number");
            None
        }
    }
}

/// Pull an enum field, accepting only the serde tag values of `T`.
fn enum_field<T: DeserializeOwned>(
    raw: &Value,
    path: &str,
    allowed: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    let value = raw.get(field_name(path)).cloned().unwrap_or(Value::Null);
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            reject(errors, path, &format!("Must be one of: {allowed}"));
            None
        }
    }
}

/// The object key for a possibly nested field path
fn field_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Validate identity verification input
pub fn validate_identity(raw: &Value) -> Result<IdentityData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let ssn = string_field(raw, "ssn", 1, "SSN must be in format XXX-XX-XXXX", &mut errors);
    if let Some(ref ssn) = ssn {
        if !SSN_RE.is_match(ssn) {
            reject(&mut errors, "ssn", "SSN must be in format XXX-XX-XXXX");
        } else if SSN_BLACKLIST.contains(&ssn.as_str()) {
            reject(&mut errors, "ssn", "Invalid SSN");
        }
    }

    let aadhaar = string_field(
        raw,
        "aadhaar",
        1,
        "Aadhaar must be in format XXXX XXXX XXXX",
        &mut errors,
    );
    if let Some(ref aadhaar) = aadhaar {
        if !AADHAAR_RE.is_match(aadhaar) {
            reject(&mut errors, "aadhaar", "Aadhaar must be in format XXXX XXXX XXXX");
        }
    }

    let full_name = string_field(raw, "fullName", 2, "Full name is required", &mut errors);
    let date_of_birth = string_field(raw, "dateOfBirth", 1, "Date of birth is required", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(IdentityData {
        ssn: ssn.unwrap(),
        aadhaar: aadhaar.unwrap(),
        full_name: full_name.unwrap(),
        date_of_birth: date_of_birth.unwrap(),
    })
}

/// Validate tax declaration input
pub fn validate_tax(raw: &Value) -> Result<TaxData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let tax_residency = enum_field(raw, "taxResidency", "us, india, both", &mut errors);
    let account_type = enum_field(raw, "accountType", "nre, nro", &mut errors);
    let investment_goal = string_field(
        raw,
        "investmentGoal",
        1,
        "Investment goal is required",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(TaxData {
        tax_residency: tax_residency.unwrap(),
        account_type: account_type.unwrap(),
        investment_goal: investment_goal.unwrap(),
    })
}

fn validate_us_bank(raw: &Value, errors: &mut FieldErrors) -> Option<UsBankAccount> {
    let Some(bank) = raw.get("usBank").filter(|v| v.is_object()) else {
        reject(errors, "usBank", "US bank details are required");
        return None;
    };

    let name = string_field(bank, "usBank.name", 1, "Bank name is required", errors);
    let account_number = string_field(
        bank,
        "usBank.accountNumber",
        8,
        "Account number must be at least 8 digits",
        errors,
    );
    let routing_number = string_field(
        bank,
        "usBank.routingNumber",
        1,
        "Routing number must be 9 digits",
        errors,
    );
    if let Some(ref routing) = routing_number {
        if !ROUTING_RE.is_match(routing) {
            reject(errors, "usBank.routingNumber", "Routing number must be 9 digits");
        }
    }

    Some(UsBankAccount {
        name: name?,
        account_number: account_number?,
        routing_number: routing_number?,
    })
}

fn validate_india_bank(raw: &Value, errors: &mut FieldErrors) -> Option<IndiaBankAccount> {
    let Some(bank) = raw.get("indiaBank").filter(|v| v.is_object()) else {
        reject(errors, "indiaBank", "India bank details are required");
        return None;
    };

    let name = string_field(bank, "indiaBank.name", 1, "Bank name is required", errors);
    let account_type = enum_field(bank, "indiaBank.accountType", "nre, nro", errors);
    let account_number = string_field(
        bank,
        "indiaBank.accountNumber",
        8,
        "Account number is required",
        errors,
    );
    let ifsc_code = string_field(
        bank,
        "indiaBank.ifscCode",
        1,
        "Invalid IFSC code format",
        errors,
    );
    if let Some(ref ifsc) = ifsc_code {
        if !IFSC_RE.is_match(ifsc) {
            reject(errors, "indiaBank.ifscCode", "Invalid IFSC code format");
        }
    }

    Some(IndiaBankAccount {
        name: name?,
        account_type: account_type?,
        account_number: account_number?,
        ifsc_code: ifsc_code?,
    })
}

/// Validate banking setup input (both US and India accounts)
pub fn validate_banking(raw: &Value) -> Result<BankingData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let us_bank = validate_us_bank(raw, &mut errors);
    let india_bank = validate_india_bank(raw, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(BankingData {
        us_bank: us_bank.unwrap(),
        india_bank: india_bank.unwrap(),
    })
}

/// Validate capital allocation input
///
/// Beyond the per-field bounds, the two market percentages must sum to
/// exactly 100; that violation is reported against the payload as a whole
/// under the `allocation` path rather than either percentage.
pub fn validate_allocation(raw: &Value) -> Result<AllocationData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let us_pct = number_field(raw, "usMarketPercentage", &mut errors);
    if let Some(pct) = us_pct {
        if !(0.0..=100.0).contains(&pct) {
            reject(&mut errors, "usMarketPercentage", "Must be between 0 and 100");
        }
    }

    let india_pct = number_field(raw, "indiaMarketPercentage", &mut errors);
    if let Some(pct) = india_pct {
        if !(0.0..=100.0).contains(&pct) {
            reject(&mut errors, "indiaMarketPercentage", "Must be between 0 and 100");
        }
    }

    let amount = number_field(raw, "initialInvestmentAmount", &mut errors);
    if let Some(amount) = amount {
        if amount < 100.0 {
            reject(&mut errors, "initialInvestmentAmount", "Minimum investment is $100");
        }
    }

    if let (Some(us), Some(india)) = (us_pct, india_pct) {
        if (us + india - 100.0).abs() > f64::EPSILON {
            reject(&mut errors, "allocation", "Allocation must total 100%");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(AllocationData {
        us_market_percentage: us_pct.unwrap(),
        india_market_percentage: india_pct.unwrap(),
        initial_investment_amount: amount.unwrap(),
    })
}

/// Validate goal setting input
pub fn validate_goals(raw: &Value) -> Result<GoalData, FieldErrors> {
    let mut errors = FieldErrors::new();

    let primary_goal = enum_field(
        raw,
        "primaryGoal",
        "us-retirement, india-retirement, wealth-building",
        &mut errors,
    );
    let time_horizon = string_field(raw, "timeHorizon", 1, "Time horizon is required", &mut errors);
    let risk_tolerance = enum_field(
        raw,
        "riskTolerance",
        "conservative, moderate, aggressive",
        &mut errors,
    );
    let visa_status = enum_field(
        raw,
        "visaStatus",
        "h1b, green-card, citizen, other",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(GoalData {
        primary_goal: primary_goal.unwrap(),
        time_horizon: time_horizon.unwrap(),
        risk_tolerance: risk_tolerance.unwrap(),
        visa_status: visa_status.unwrap(),
    })
}

/// Dispatch validation for any step
///
/// Welcome and Completion collect no data and validate to `None`.
pub fn validate_step(step: OnboardingStep, raw: &Value) -> Result<Option<StepPayload>, FieldErrors> {
    match step {
        OnboardingStep::Welcome | OnboardingStep::Completion => Ok(None),
        OnboardingStep::Identity => validate_identity(raw).map(StepPayload::Identity).map(Some),
        OnboardingStep::Tax => validate_tax(raw).map(StepPayload::Tax).map(Some),
        OnboardingStep::Banking => validate_banking(raw).map(StepPayload::Banking).map(Some),
        OnboardingStep::Allocation => validate_allocation(raw)
            .map(StepPayload::Allocation)
            .map(Some),
        OnboardingStep::Goals => validate_goals(raw).map(StepPayload::Goals).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_identity() -> Value {
        json!({
            "ssn": "123-45-6789",
            "aadhaar": "1234 5678 9012",
            "fullName": "Priya Sharma",
            "dateOfBirth": "1990-01-01",
        })
    }

    #[test]
    fn test_identity_accepted() {
        let data = validate_identity(&valid_identity()).unwrap();
        assert_eq!(data.ssn, "123-45-6789");
        assert_eq!(data.full_name, "Priya Sharma");
    }

    #[test]
    fn test_ssn_format_rejected() {
        let mut raw = valid_identity();
        raw["ssn"] = json!("123456789");
        let errors = validate_identity(&raw).unwrap_err();
        assert_eq!(errors["ssn"], "SSN must be in format XXX-XX-XXXX");
    }

    #[test]
    fn test_ssn_blacklist_rejected_despite_matching_pattern() {
        let mut raw = valid_identity();
        raw["ssn"] = json!("000-00-0000");
        let errors = validate_identity(&raw).unwrap_err();
        assert_eq!(errors["ssn"], "Invalid SSN");
    }

    #[test]
    fn test_aadhaar_requires_single_spaces() {
        let mut raw = valid_identity();
        raw["aadhaar"] = json!("123456789012");
        let errors = validate_identity(&raw).unwrap_err();
        assert_eq!(errors["aadhaar"], "Aadhaar must be in format XXXX XXXX XXXX");
    }

    #[test]
    fn test_full_name_min_length() {
        let mut raw = valid_identity();
        raw["fullName"] = json!("A");
        let errors = validate_identity(&raw).unwrap_err();
        assert!(errors.contains_key("fullName"));
    }

    #[test]
    fn test_identity_reports_every_violation() {
        let errors = validate_identity(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("ssn"));
        assert!(errors.contains_key("aadhaar"));
        assert!(errors.contains_key("fullName"));
        assert!(errors.contains_key("dateOfBirth"));
    }

    #[test]
    fn test_tax_enum_rejected() {
        let raw = json!({
            "taxResidency": "canada",
            "accountType": "nre",
            "investmentGoal": "Growth",
        });
        let errors = validate_tax(&raw).unwrap_err();
        assert_eq!(errors["taxResidency"], "Must be one of: us, india, both");
    }

    #[test]
    fn test_tax_accepted() {
        let raw = json!({
            "taxResidency": "both",
            "accountType": "nro",
            "investmentGoal": "Retirement",
        });
        let data = validate_tax(&raw).unwrap();
        assert_eq!(data.tax_residency, crate::models::TaxResidency::Both);
        assert_eq!(data.account_type, crate::models::AccountType::Nro);
    }

    fn valid_banking() -> Value {
        json!({
            "usBank": {
                "name": "Chase",
                "accountNumber": "12345678",
                "routingNumber": "021000021",
            },
            "indiaBank": {
                "name": "HDFC Bank",
                "accountType": "nre",
                "accountNumber": "98765432",
                "ifscCode": "HDFC0001234",
            },
        })
    }

    #[test]
    fn test_banking_accepted() {
        let data = validate_banking(&valid_banking()).unwrap();
        assert_eq!(data.us_bank.routing_number, "021000021");
        assert_eq!(data.india_bank.ifsc_code, "HDFC0001234");
    }

    #[test]
    fn test_routing_number_must_be_nine_digits() {
        let mut raw = valid_banking();
        raw["usBank"]["routingNumber"] = json!("12345678");
        let errors = validate_banking(&raw).unwrap_err();
        assert_eq!(errors["usBank.routingNumber"], "Routing number must be 9 digits");
    }

    #[test]
    fn test_ifsc_format() {
        let mut raw = valid_banking();
        raw["indiaBank"]["ifscCode"] = json!("hdfc0001234");
        let errors = validate_banking(&raw).unwrap_err();
        assert_eq!(errors["indiaBank.ifscCode"], "Invalid IFSC code format");

        // Fifth character must be the literal zero
        let mut raw = valid_banking();
        raw["indiaBank"]["ifscCode"] = json!("HDFC1001234");
        assert!(validate_banking(&raw).is_err());
    }

    #[test]
    fn test_account_number_min_length() {
        let mut raw = valid_banking();
        raw["usBank"]["accountNumber"] = json!("1234567");
        let errors = validate_banking(&raw).unwrap_err();
        assert!(errors.contains_key("usBank.accountNumber"));
    }

    #[test]
    fn test_missing_bank_object_reported_at_bank_path() {
        let errors = validate_banking(&json!({})).unwrap_err();
        assert!(errors.contains_key("usBank"));
        assert!(errors.contains_key("indiaBank"));
    }

    #[test]
    fn test_allocation_accepted() {
        let raw = json!({
            "usMarketPercentage": 60,
            "indiaMarketPercentage": 40,
            "initialInvestmentAmount": 500,
        });
        let data = validate_allocation(&raw).unwrap();
        assert_eq!(data.us_market_percentage, 60.0);
        assert_eq!(data.india_market_percentage, 40.0);
    }

    #[test]
    fn test_allocation_sum_must_be_exactly_100() {
        let raw = json!({
            "usMarketPercentage": 60,
            "indiaMarketPercentage": 50,
            "initialInvestmentAmount": 500,
        });
        let errors = validate_allocation(&raw).unwrap_err();
        assert_eq!(errors["allocation"], "Allocation must total 100%");
        // Both percentages are individually in range, so neither gets an error
        assert!(!errors.contains_key("usMarketPercentage"));
        assert!(!errors.contains_key("indiaMarketPercentage"));
    }

    #[test]
    fn test_allocation_percentage_bounds() {
        let raw = json!({
            "usMarketPercentage": 120,
            "indiaMarketPercentage": -20,
            "initialInvestmentAmount": 500,
        });
        let errors = validate_allocation(&raw).unwrap_err();
        assert!(errors.contains_key("usMarketPercentage"));
        assert!(errors.contains_key("indiaMarketPercentage"));
    }

    #[test]
    fn test_minimum_investment() {
        let raw = json!({
            "usMarketPercentage": 50,
            "indiaMarketPercentage": 50,
            "initialInvestmentAmount": 99.99,
        });
        let errors = validate_allocation(&raw).unwrap_err();
        assert_eq!(errors["initialInvestmentAmount"], "Minimum investment is $100");
    }

    #[test]
    fn test_allocation_non_numeric_input() {
        let raw = json!({
            "usMarketPercentage": "sixty",
            "indiaMarketPercentage": 40,
            "initialInvestmentAmount": 500,
        });
        let errors = validate_allocation(&raw).unwrap_err();
        assert_eq!(errors["usMarketPercentage"], "Must be a number");
    }

    #[test]
    fn test_goals_accepted() {
        let raw = json!({
            "primaryGoal": "wealth-building",
            "timeHorizon": "10+",
            "riskTolerance": "aggressive",
            "visaStatus": "h1b",
        });
        let data = validate_goals(&raw).unwrap();
        assert_eq!(data.primary_goal, crate::models::PrimaryGoal::WealthBuilding);
        assert_eq!(data.visa_status, crate::models::VisaStatus::H1b);
    }

    #[test]
    fn test_goals_enum_rejected() {
        let raw = json!({
            "primaryGoal": "get-rich-quick",
            "timeHorizon": "10+",
            "riskTolerance": "aggressive",
            "visaStatus": "h1b",
        });
        let errors = validate_goals(&raw).unwrap_err();
        assert!(errors.contains_key("primaryGoal"));
    }

    #[test]
    fn test_dispatch_skips_non_payload_steps() {
        assert_eq!(validate_step(OnboardingStep::Welcome, &Value::Null), Ok(None));
        assert_eq!(validate_step(OnboardingStep::Completion, &Value::Null), Ok(None));
    }

    #[test]
    fn test_dispatch_routes_to_step_validator() {
        let payload = validate_step(OnboardingStep::Identity, &valid_identity())
            .unwrap()
            .unwrap();
        assert_eq!(payload.step(), OnboardingStep::Identity);
    }
}
