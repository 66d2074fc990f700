pub mod notify;
pub mod orders;

use validator::{ValidationErrors, ValidationErrorsKind};

/// Surface the first failing field's message and nothing else; echoing the
/// full validator report would leak the internal schema.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(error) = list.first() {
                    return error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => return first_validation_message(inner),
            ValidationErrorsKind::List(map) => {
                if let Some(inner) = map.values().next() {
                    return first_validation_message(inner);
                }
            }
        }
    }
    "request failed validation".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
    }

    #[test]
    fn surfaces_the_field_message() {
        let err = Probe {
            name: "ab".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(first_validation_message(&err), "name too short");
    }
}
