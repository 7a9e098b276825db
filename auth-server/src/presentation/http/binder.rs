//! Decode-and-validate pipeline for inbound request payloads.
//!
//! [`bind`] knows nothing about axum: it takes raw bytes and a
//! [`RequestDecoder`], and reports failures as an [`AppError`] that the
//! caller returns as-is. A failed bind ends the request.

use serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned, Visitor},
    forward_to_deserialize_any,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::domain::error::DomainError;
use crate::presentation::http::app_error::{AppError, AppResult, InvalidArgument};

pub const INVALID_ARGS_REASON: &str = "Invalid request parameters. See invalidArgs";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed json payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed form payload: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
}

pub trait RequestDecoder {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonDecoder;

impl RequestDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, DecodeError> {
        // A `null` document binds like `{}`: every field keeps its default.
        if raw.trim_ascii() == b"null" {
            return Ok(serde_json::from_slice(b"{}")?);
        }
        Ok(serde_json::from_slice(raw)?)
    }
}

/// `application/x-www-form-urlencoded` bodies, decoded the way axum's `Form` does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormDecoder;

impl RequestDecoder for FormDecoder {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_urlencoded::from_bytes(raw)?)
    }
}

/// Decoder picked per request by [`decoder_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadDecoder {
    Json(JsonDecoder),
    Form(FormDecoder),
}

impl RequestDecoder for PayloadDecoder {
    fn decode<T: DeserializeOwned>(&self, raw: &[u8]) -> Result<T, DecodeError> {
        match self {
            Self::Json(decoder) => decoder.decode(raw),
            Self::Form(decoder) => decoder.decode(raw),
        }
    }
}

/// Picks a decoder for the request's `Content-Type`. A missing header is read as JSON.
pub fn decoder_for(content_type: Option<&str>) -> Result<PayloadDecoder, DecodeError> {
    let Some(content_type) = content_type else {
        return Ok(PayloadDecoder::Json(JsonDecoder));
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        Ok(PayloadDecoder::Json(JsonDecoder))
    } else if essence == FORM_CONTENT_TYPE {
        Ok(PayloadDecoder::Form(FormDecoder))
    } else {
        Err(DecodeError::UnsupportedContentType(content_type.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("value of '{field}' cannot be reported as text")]
struct UnrepresentableValue {
    field: String,
}

pub fn bind<T, D>(decoder: &D, raw: &[u8]) -> AppResult<T>
where
    T: DeserializeOwned + Validate,
    D: RequestDecoder,
{
    let target: T = decoder.decode(raw).map_err(|err| {
        debug!(error = %err, "error binding data");
        AppError::from(DomainError::internal_server_error())
    })?;

    if let Err(errors) = target.validate() {
        debug!(error = %errors, "request failed validation");

        let mut invalid_args = Vec::new();
        collect_invalid_args("", declared_fields::<T>(), &errors, &mut invalid_args).map_err(
            |err| {
                debug!(error = %err, "error reporting invalid arguments");
                AppError::from(DomainError::internal_server_error())
            },
        )?;

        return Err(AppError::with_invalid_args(
            DomainError::bad_request(INVALID_ARGS_REASON),
            invalid_args,
        ));
    }

    Ok(target)
}

/// Treats `""` like a missing value so `required` rejects both.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

/// Field names of `T` in declaration order, as its `Deserialize` impl lists them.
///
/// Empty for anything that is not deserialized as a plain struct.
fn declared_fields<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut fields: &'static [&'static str] = &[];
    let _ = T::deserialize(FieldNames(&mut fields));
    fields
}

/// Deserializer that only records the field list handed to `deserialize_struct`.
struct FieldNames<'a>(&'a mut &'static [&'static str]);

impl<'de> Deserializer<'de> for FieldNames<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.0 = fields;
        Err(de::Error::custom("field names recorded"))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

// Fields follow `order` (declaration order); the rest, and every nested
// struct, fall back to name order so the report is stable across calls.
fn collect_invalid_args(
    prefix: &str,
    order: &[&str],
    errors: &ValidationErrors,
    out: &mut Vec<InvalidArgument>,
) -> Result<(), UnrepresentableValue> {
    let rank = |field: &str| {
        order
            .iter()
            .position(|name| *name == field)
            .unwrap_or(order.len())
    };

    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|(left, _), (right, _)| {
        rank(left).cmp(&rank(right)).then_with(|| left.cmp(right))
    });

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(violations) => {
                for violation in violations {
                    out.push(invalid_argument(&path, violation)?);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_invalid_args(&path, &[], inner, out)?,
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_invalid_args(&format!("{path}[{index}]"), &[], inner, out)?;
                }
            }
        }
    }

    Ok(())
}

fn invalid_argument(
    field: &str,
    violation: &ValidationError,
) -> Result<InvalidArgument, UnrepresentableValue> {
    let value = value_text(violation.params.get("value")).ok_or_else(|| UnrepresentableValue {
        field: field.to_string(),
    })?;
    let (tag, param) = tag_and_param(violation);

    Ok(InvalidArgument {
        field: field.to_string(),
        value,
        tag,
        param,
    })
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => None,
    }
}

fn tag_and_param(violation: &ValidationError) -> (String, String) {
    match &*violation.code {
        "length" | "range" => bound_violation(violation),
        code => (code.to_string(), single_param(violation)),
    }
}

// (param, tag, violated?) checked in this order; the first violated bound wins.
const BOUNDS: [(&str, &str, fn(f64, f64) -> bool); 5] = [
    ("min", "gte", |measured, bound| measured < bound),
    ("exclusive_min", "gt", |measured, bound| measured <= bound),
    ("max", "lte", |measured, bound| measured > bound),
    ("exclusive_max", "lt", |measured, bound| measured >= bound),
    ("equal", "len", |measured, bound| measured != bound),
];

fn bound_violation(violation: &ValidationError) -> (String, String) {
    let measured = measure(violation.params.get("value"));

    let present = BOUNDS.iter().filter_map(|(name, tag, violated)| {
        let bound = violation.params.get(*name)?;
        Some((bound, *tag, violated))
    });

    let mut fallback = None;
    for (bound, tag, violated) in present {
        match (measured, bound.as_f64()) {
            (Some(measured), Some(limit)) if violated(measured, limit) => {
                return (tag.to_string(), param_text(bound));
            }
            (Some(_), Some(_)) => {}
            _ => {
                fallback.get_or_insert_with(|| (tag.to_string(), param_text(bound)));
            }
        }
    }

    fallback.unwrap_or_else(|| (violation.code.to_string(), String::new()))
}

fn measure(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::String(text) => Some(text.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

fn single_param(violation: &ValidationError) -> String {
    let mut params = violation
        .params
        .iter()
        .filter(|&(name, _)| name != "value");

    match (params.next(), params.next()) {
        (Some((_, param)), None) => param_text(param),
        _ => String::new(),
    }
}

fn param_text(param: &Value) -> String {
    match param {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use validator::Validate;

    use super::{
        DecodeError, FormDecoder, INVALID_ARGS_REASON, JsonDecoder, PayloadDecoder, bind,
        decoder_for, empty_string_as_none,
    };
    use crate::domain::error::{DomainError, ErrorKind};
    use crate::presentation::http::app_error::{AppError, InvalidArgument};

    #[derive(Debug, Deserialize, Validate)]
    struct Credentials {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        #[validate(required, email)]
        email: Option<String>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        #[validate(required, length(min = 6, max = 30))]
        password: Option<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Profile {
        #[validate(length(min = 1))]
        name: String,
        #[validate(range(min = 13, max = 130))]
        age: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Registration {
        #[validate(nested)]
        profile: Profile,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Tags {
        #[validate(length(min = 2))]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Reversed {
        #[serde(default)]
        #[validate(required)]
        zeta: Option<String>,
        #[serde(default)]
        #[validate(required)]
        alpha: Option<String>,
    }

    fn bind_credentials(raw: &str) -> Result<Credentials, AppError> {
        bind(&JsonDecoder, raw.as_bytes())
    }

    fn invalid_args(err: &AppError) -> Vec<InvalidArgument> {
        err.invalid_args()
            .expect("invalid args must be attached")
            .to_vec()
    }

    fn arg(field: &str, value: &str, tag: &str, param: &str) -> InvalidArgument {
        InvalidArgument {
            field: field.to_string(),
            value: value.to_string(),
            tag: tag.to_string(),
            param: param.to_string(),
        }
    }

    #[test]
    fn valid_payload_is_populated_unchanged() {
        let creds = bind_credentials(r#"{"email":"a@b.com","password":"longenough1"}"#)
            .expect("bind must succeed");
        assert_eq!(creds.email.as_deref(), Some("a@b.com"));
        assert_eq!(creds.password.as_deref(), Some("longenough1"));
    }

    #[test]
    fn blank_email_and_missing_password_are_both_reported() {
        let err = bind_credentials(r#"{"email":""}"#).expect_err("bind must fail");

        assert_eq!(err.error().kind(), ErrorKind::BadRequest);
        assert_eq!(err.error(), &DomainError::bad_request(INVALID_ARGS_REASON));
        assert_eq!(
            invalid_args(&err),
            vec![
                arg("email", "", "required", ""),
                arg("password", "", "required", ""),
            ]
        );
    }

    #[test]
    fn missing_field_is_tagged_required() {
        let err = bind_credentials(r#"{"email":"a@b.com"}"#).expect_err("bind must fail");
        assert_eq!(invalid_args(&err), vec![arg("password", "", "required", "")]);
    }

    #[test]
    fn short_password_reports_lower_bound() {
        let err = bind_credentials(r#"{"email":"a@b.com","password":"123"}"#)
            .expect_err("bind must fail");
        assert_eq!(invalid_args(&err), vec![arg("password", "123", "gte", "6")]);
    }

    #[test]
    fn long_password_reports_upper_bound() {
        let password = "x".repeat(31);
        let raw = format!(r#"{{"email":"a@b.com","password":"{password}"}}"#);
        let err = bind_credentials(&raw).expect_err("bind must fail");
        assert_eq!(invalid_args(&err), vec![arg("password", &password, "lte", "30")]);
    }

    #[test]
    fn every_violation_lands_in_one_error() {
        let err = bind_credentials(r#"{"email":"not-an-email","password":"123"}"#)
            .expect_err("bind must fail");
        assert_eq!(
            invalid_args(&err),
            vec![
                arg("email", "not-an-email", "email", ""),
                arg("password", "123", "gte", "6"),
            ]
        );
    }

    #[test]
    fn bind_is_idempotent() {
        let raw = r#"{"email":"nope","password":"1"}"#;
        let first = bind_credentials(raw).expect_err("bind must fail");
        let second = bind_credentials(raw).expect_err("bind must fail");

        assert_eq!(first.error(), second.error());
        assert_eq!(invalid_args(&first), invalid_args(&second));
    }

    #[test]
    fn malformed_payload_is_internal() {
        let err = bind_credentials("{not json").expect_err("bind must fail");
        assert_eq!(err.error(), &DomainError::internal_server_error());
        assert!(err.invalid_args().is_none());
    }

    #[test]
    fn wrong_shape_is_internal() {
        let err = bind_credentials(r#"{"email":42}"#).expect_err("bind must fail");
        assert_eq!(err.error().kind(), ErrorKind::Internal);
    }

    #[test]
    fn nested_fields_use_dotted_paths_and_numbers_as_text() {
        let err = bind::<Registration, _>(
            &JsonDecoder,
            br#"{"profile":{"name":"","age":7}}"#,
        )
        .expect_err("bind must fail");

        let args = invalid_args(&err);
        assert_eq!(args.len(), 2);

        assert_eq!(args[0].field, "profile.age");
        assert_eq!(args[0].value, "7");
        assert_eq!(args[0].tag, "gte");
        assert_eq!(args[0].param.parse::<f64>().ok(), Some(13.0));

        assert_eq!(args[1], arg("profile.name", "", "gte", "1"));
    }

    #[test]
    fn null_document_reports_every_required_field() {
        let err = bind_credentials(" null\n").expect_err("bind must fail");

        assert_eq!(err.error().kind(), ErrorKind::BadRequest);
        assert_eq!(
            invalid_args(&err),
            vec![
                arg("email", "", "required", ""),
                arg("password", "", "required", ""),
            ]
        );
    }

    #[test]
    fn list_value_cannot_be_reported_so_bind_is_internal() {
        let err = bind::<Tags, _>(&JsonDecoder, br#"{"tags":["a"]}"#)
            .expect_err("bind must fail");

        assert_eq!(err.error().kind(), ErrorKind::Internal);
        assert_eq!(err.error(), &DomainError::internal_server_error());
        assert!(err.invalid_args().is_none());
    }

    #[test]
    fn violations_follow_declaration_order() {
        let err = bind::<Reversed, _>(&JsonDecoder, b"{}").expect_err("bind must fail");

        let fields: Vec<_> = invalid_args(&err)
            .into_iter()
            .map(|arg| arg.field)
            .collect();
        assert_eq!(fields, ["zeta", "alpha"]);
    }

    #[test]
    fn form_payload_is_bound_like_json() {
        let creds: Credentials = bind(&FormDecoder, b"email=a%40b.com&password=longenough1")
            .expect("bind must succeed");
        assert_eq!(creds.email.as_deref(), Some("a@b.com"));
        assert_eq!(creds.password.as_deref(), Some("longenough1"));

        let err = bind::<Credentials, _>(&FormDecoder, b"email=&password=123")
            .expect_err("bind must fail");
        assert_eq!(
            invalid_args(&err),
            vec![
                arg("email", "", "required", ""),
                arg("password", "123", "gte", "6"),
            ]
        );
    }

    #[test]
    fn decoder_is_chosen_by_content_type() {
        let json = Some(PayloadDecoder::Json(JsonDecoder));
        assert_eq!(decoder_for(None).ok(), json);
        assert_eq!(decoder_for(Some("application/json")).ok(), json);
        assert_eq!(decoder_for(Some("Application/JSON; charset=utf-8")).ok(), json);
        assert_eq!(decoder_for(Some("application/problem+json")).ok(), json);
        assert_eq!(
            decoder_for(Some("application/x-www-form-urlencoded; charset=utf-8")).ok(),
            Some(PayloadDecoder::Form(FormDecoder))
        );
        assert!(matches!(
            decoder_for(Some("text/plain")),
            Err(DecodeError::UnsupportedContentType(_))
        ));
    }
}
