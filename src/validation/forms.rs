//! Validators for the login, registration, password and client forms.

use super::password::{is_email_valid, is_password_strong};
use super::{Checks, ValidationErrorKind, ValidationErrors};
use crate::models::{AdditionalAttribute, Gender, Person};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const MIN_USERNAME_LENGTH: usize = 3;
const MIN_LOGIN_PASSWORD_LENGTH: usize = 6;
const MIN_RESET_PASSWORD_LENGTH: usize = 8;

const MAX_FULL_NAME_LENGTH: usize = 150;
const MAX_IDENTIFICATION_LENGTH: usize = 50;
const MAX_EMPLOYEE_ID_LENGTH: usize = 50;
const MAX_OTHER_DISEASE_LENGTH: usize = 255;
const MAX_ATTRIBUTE_KEY_LENGTH: usize = 50;
const MAX_ATTRIBUTE_VALUE_LENGTH: usize = 100;

const MIN_AGE: i64 = 0;
const MAX_AGE: i64 = 120;

/// Credentials entered on the login screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Employee self-registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub full_name: String,
    pub employee_id: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request for a password reset link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

/// New password chosen from a reset link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetForm {
    /// Token carried by the reset link.
    pub token: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Client data as entered in the new/edit client form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonForm {
    pub full_name: String,
    pub identification: String,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub active: bool,
    pub drives: bool,
    pub wears_glasses: bool,
    pub diabetic: bool,
    pub other_disease: Option<String>,
    pub additional_attributes: Vec<AdditionalAttribute>,
}

impl From<&Person> for PersonForm {
    fn from(person: &Person) -> Self {
        Self {
            full_name: person.full_name.clone(),
            identification: person.identification.clone(),
            age: Some(person.age).filter(|age| age.is_finite()),
            gender: Some(person.gender),
            active: person.active,
            drives: person.drives,
            wears_glasses: person.wears_glasses,
            diabetic: person.diabetic,
            other_disease: person.other_disease.clone(),
            additional_attributes: person.additional_attributes.clone(),
        }
    }
}

fn check_email(checks: &mut Checks, field: &str, email: &str) {
    if checks.required(field, email) && !is_email_valid(email) {
        checks.push(field, ValidationErrorKind::Email);
    }
}

fn check_passwords_match(checks: &mut Checks, password: &str, confirm: &str) {
    if password != confirm {
        checks.push("confirmPassword", ValidationErrorKind::PasswordMismatch);
    }
}

pub fn validate_login(form: &LoginForm) -> Result<(), ValidationErrors> {
    let mut checks = Checks::default();

    checks.required("username", &form.username);
    checks.min_length("username", &form.username, MIN_USERNAME_LENGTH);

    checks.required("password", &form.password);
    checks.min_length("password", &form.password, MIN_LOGIN_PASSWORD_LENGTH);

    checks.finish()
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationErrors> {
    let mut checks = Checks::default();

    checks.required("fullName", &form.full_name);
    checks.max_length("fullName", &form.full_name, MAX_FULL_NAME_LENGTH);

    checks.required("employeeId", &form.employee_id);
    checks.max_length("employeeId", &form.employee_id, MAX_EMPLOYEE_ID_LENGTH);

    check_email(&mut checks, "email", &form.email);

    checks.required("password", &form.password);
    checks.min_length("password", &form.password, MIN_LOGIN_PASSWORD_LENGTH);

    checks.required("confirmPassword", &form.confirm_password);
    check_passwords_match(&mut checks, &form.password, &form.confirm_password);

    checks.finish()
}

pub fn validate_forgot_password(form: &ForgotPasswordForm) -> Result<(), ValidationErrors> {
    let mut checks = Checks::default();
    check_email(&mut checks, "email", &form.email);
    checks.finish()
}

pub fn validate_password_reset(form: &PasswordResetForm) -> Result<(), ValidationErrors> {
    let mut checks = Checks::default();

    if form.token.as_deref().map_or(true, str::is_empty) {
        checks.push("token", ValidationErrorKind::MissingToken);
    }

    for (field, value) in [
        ("password", &form.password),
        ("confirmPassword", &form.confirm_password),
    ] {
        if checks.required(field, value) {
            checks.min_length(field, value, MIN_RESET_PASSWORD_LENGTH);
            if !is_password_strong(value) {
                checks.push(field, ValidationErrorKind::PasswordStrength);
            }
        }
    }

    check_passwords_match(&mut checks, &form.password, &form.confirm_password);

    checks.finish()
}

pub fn validate_person(form: &PersonForm) -> Result<(), ValidationErrors> {
    let mut checks = Checks::default();

    checks.required("fullName", &form.full_name);
    checks.max_length("fullName", &form.full_name, MAX_FULL_NAME_LENGTH);

    checks.required("identification", &form.identification);
    checks.max_length("identification", &form.identification, MAX_IDENTIFICATION_LENGTH);

    match form.age {
        None => checks.push("age", ValidationErrorKind::Required),
        Some(age) if age < MIN_AGE as f64 => {
            checks.push("age", ValidationErrorKind::Min { min: MIN_AGE })
        }
        Some(age) if age > MAX_AGE as f64 => {
            checks.push("age", ValidationErrorKind::Max { max: MAX_AGE })
        }
        Some(_) => {}
    }

    if form.gender.is_none() {
        checks.push("gender", ValidationErrorKind::Required);
    }

    if let Some(ref disease) = form.other_disease {
        checks.max_length("otherDisease", disease, MAX_OTHER_DISEASE_LENGTH);
    }

    let mut seen_keys = HashSet::new();
    for (i, attribute) in form.additional_attributes.iter().enumerate() {
        let key_field = format!("additionalAttributes[{}].key", i);
        let value_field = format!("additionalAttributes[{}].value", i);

        if checks.required(&key_field, &attribute.key) {
            checks.max_length(&key_field, &attribute.key, MAX_ATTRIBUTE_KEY_LENGTH);

            let normalized = attribute.key.trim().to_lowercase();
            if !normalized.is_empty() && !seen_keys.insert(normalized.clone()) {
                checks.push(
                    &key_field,
                    ValidationErrorKind::DuplicateKey { key: normalized },
                );
            }
        }

        checks.required(&value_field, &attribute.value);
        checks.max_length(&value_field, &attribute.value, MAX_ATTRIBUTE_VALUE_LENGTH);
    }

    checks.finish()
}
