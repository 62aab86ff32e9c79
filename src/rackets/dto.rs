use serde::Deserialize;

use crate::error::AppError;

/// Form body for racket create and update; wire names are the original
/// Spanish field names, carried on both POST and PUT.
#[derive(Debug, Deserialize)]
pub struct RacketForm {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "peso")]
    pub weight: f64,
    pub material: String,
}

impl RacketForm {
    /// Negative price or weight is rejected; presence of the fields is
    /// already enforced by deserialization.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.price < 0.0 {
            return Err(AppError::Validation("precio no puede ser negativo".into()));
        }
        if self.weight < 0.0 {
            return Err(AppError::Validation("peso no puede ser negativo".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: f64, weight: f64) -> RacketForm {
        RacketForm {
            brand: "Babolat".into(),
            price,
            model: "Pure Drive".into(),
            weight,
            material: "Fibra de carbono".into(),
        }
    }

    #[test]
    fn wire_names_are_spanish() {
        let parsed: RacketForm = serde_json::from_value(serde_json::json!({
            "marca": "Wilson",
            "precio": 180,
            "modelo": "Pro Staff",
            "peso": 305,
            "material": "Grafito",
        }))
        .expect("deserialize");
        assert_eq!(parsed.brand, "Wilson");
        assert_eq!(parsed.weight, 305.0);
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(matches!(
            form(-1.0, 300.0).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(
            form(180.0, -300.0).validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn zero_values_pass() {
        assert!(form(0.0, 0.0).validate().is_ok());
    }
}
