//! Prediction DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// `equipmentId` may be sent as a number or a numeric string
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[schema(value_type = Option<String>, example = "42")]
    pub equipment_id: Option<Value>,
}

impl PredictionRequest {
    pub fn equipment_id(&self) -> Result<i64, &'static str> {
        let raw = match &self.equipment_id {
            None | Some(Value::Null) => return Err("equipmentId is required"),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => return Err("equipmentId must be numeric"),
        };
        if raw.is_empty() {
            return Err("equipmentId is required");
        }
        raw.parse::<i64>().map_err(|_| "equipmentId must be numeric")
    }
}

/// Body sent back when the prediction service answered with an error
#[derive(Debug, Serialize, ToSchema)]
pub struct UpstreamErrorDto {
    pub error: String,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> PredictionRequest {
        serde_json::from_value(json!({ "equipmentId": value })).unwrap()
    }

    #[test]
    fn equipment_id_must_be_numeric() {
        assert_eq!(request(json!(42)).equipment_id(), Ok(42));
        assert_eq!(request(json!(" 17 ")).equipment_id(), Ok(17));
        assert_eq!(request(json!("pump-3")).equipment_id(), Err("equipmentId must be numeric"));
        assert_eq!(request(json!(true)).equipment_id(), Err("equipmentId must be numeric"));
        assert_eq!(request(json!("")).equipment_id(), Err("equipmentId is required"));
        assert_eq!(request(Value::Null).equipment_id(), Err("equipmentId is required"));
    }
}
