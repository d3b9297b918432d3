use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod classify;

use classify::{classify, Verdict};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyzeFood {
    pub barcode: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeFoodResponse {
    pub requires_clarification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmful_ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub name: &'static str,
    pub ingredients: &'static str,
}

pub type Catalog = Arc<HashMap<&'static str, Product>>;

pub fn catalog() -> Catalog {
    let products = [
        (
            "3017620422003",
            Product {
                name: "Nutella",
                ingredients: "Sugar, Palm Oil, Hazelnuts, Skimmed Milk Powder, Fat-Reduced Cocoa, Soy Lecithin, Vanillin",
            },
        ),
        (
            "5000159484695",
            Product {
                name: "Peanut Butter Cups",
                ingredients: "Milk Chocolate, Peanuts, Sugar, Dextrose, Salt",
            },
        ),
        (
            "8001505005707",
            Product {
                name: "Sparkling Water",
                ingredients: "Water, Carbon Dioxide",
            },
        ),
    ];
    Arc::new(products.into_iter().collect())
}

pub fn app() -> Router {
    Router::new()
        .route("/analyze-food", post(analyze_food))
        .layer(TraceLayer::new_for_http())
        .with_state(catalog())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

fn reject(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    let error = message.into();
    tracing::info!(%status, %error, "analysis rejected");
    (status, Json(ErrorBody { error }))
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn analyze_food(
    State(catalog): State<Catalog>,
    Json(input): Json<AnalyzeFood>,
) -> ApiResult<AnalyzeFoodResponse> {
    let barcode = present(input.barcode);
    let ingredients = present(input.ingredients);

    let (product_name, ingredients) = match (barcode, ingredients) {
        (None, None) => {
            return Err(reject(
                StatusCode::BAD_REQUEST,
                "Please provide a barcode or ingredients list",
            ))
        }
        (Some(barcode), _) if !barcode.chars().all(|c| c.is_ascii_digit()) => {
            return Err(reject(StatusCode::BAD_REQUEST, "Invalid barcode"));
        }
        (Some(barcode), ingredients) => match catalog.get(barcode.as_str()) {
            Some(product) => (Some(product.name.to_string()), product.ingredients.to_string()),
            None => match ingredients {
                Some(ingredients) => (None, ingredients),
                None => {
                    return Err(reject(
                        StatusCode::NOT_FOUND,
                        format!("Product not found for barcode {barcode}"),
                    ))
                }
            },
        },
        (None, Some(ingredients)) => (None, ingredients),
    };

    let response = match classify(&ingredients) {
        Verdict::NeedsClarification(message) => AnalyzeFoodResponse {
            requires_clarification: true,
            clarification_message: Some(message),
            product_name: None,
            safety_status: None,
            harmful_ingredients: None,
            explanation: None,
        },
        Verdict::Decided {
            status,
            harmful,
            explanation,
        } => AnalyzeFoodResponse {
            requires_clarification: false,
            clarification_message: None,
            product_name,
            safety_status: Some(status.to_string()),
            harmful_ingredients: Some(harmful),
            explanation: Some(explanation),
        },
    };
    tracing::debug!(
        clarification = response.requires_clarification,
        status = response.safety_status.as_deref().unwrap_or(""),
        "analysis completed"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_response_serializes_to_wire_shape() {
        let response = AnalyzeFoodResponse {
            requires_clarification: false,
            clarification_message: None,
            product_name: None,
            safety_status: Some("SAFE".to_string()),
            harmful_ingredients: Some(Vec::new()),
            explanation: Some("ok".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "requires_clarification": false,
                "safety_status": "SAFE",
                "harmful_ingredients": [],
                "explanation": "ok"
            })
        );
    }

    #[test]
    fn analyze_food_accepts_partial_body() {
        let input: AnalyzeFood = serde_json::from_str(r#"{"barcode":"123"}"#).unwrap();
        assert_eq!(input.barcode.as_deref(), Some("123"));
        assert!(input.ingredients.is_none());
    }

    #[test]
    fn present_drops_blank_values() {
        assert_eq!(present(Some("  ".to_string())), None);
        assert_eq!(present(Some(" 12 ".to_string())).as_deref(), Some("12"));
    }

    #[test]
    fn catalog_barcodes_are_numeric() {
        for barcode in catalog().keys() {
            assert!(barcode.chars().all(|c| c.is_ascii_digit()), "{barcode}");
        }
    }
}
