use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::pricing::money::from_cents;
use crate::pricing::{
    CachedQuote, DomesticQuoteRequest, OverseasQuoteRequest, QuoteError, QuoteType,
    DEFAULT_SHIPPING_METHOD, DEFAULT_SHIPPING_SPEED,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignId(pub String);

/// Stored quote parameters. Mode-specific fields are optional so a quote
/// can switch between domestic and overseas through an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSelections {
    pub quote_type: QuoteType,
    pub quantity: u32,
    #[serde(default)]
    pub front_decoration: Option<String>,
    #[serde(default)]
    pub left_decoration: Option<String>,
    #[serde(default)]
    pub right_decoration: Option<String>,
    #[serde(default)]
    pub back_decoration: Option<String>,
    #[serde(default)]
    pub style_number: Option<String>,
    #[serde(default)]
    pub shipping_speed: Option<String>,
    #[serde(default)]
    pub include_rope: Option<bool>,
    #[serde(default)]
    pub num_dst_files: Option<u32>,
    #[serde(default)]
    pub hat_type: Option<String>,
    #[serde(default)]
    pub visor_decoration: Option<String>,
    #[serde(default)]
    pub design_addons: Option<Vec<String>>,
    #[serde(default)]
    pub accessories: Option<Vec<String>>,
    #[serde(default)]
    pub shipping_method: Option<String>,
}

impl QuoteSelections {
    pub fn domestic(style_number: impl Into<String>, quantity: u32) -> Self {
        Self {
            style_number: Some(style_number.into()),
            ..Self::empty(QuoteType::Domestic, quantity)
        }
    }

    pub fn overseas(hat_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            hat_type: Some(hat_type.into()),
            ..Self::empty(QuoteType::Overseas, quantity)
        }
    }

    fn empty(quote_type: QuoteType, quantity: u32) -> Self {
        Self {
            quote_type,
            quantity,
            front_decoration: None,
            left_decoration: None,
            right_decoration: None,
            back_decoration: None,
            style_number: None,
            shipping_speed: None,
            include_rope: None,
            num_dst_files: None,
            hat_type: None,
            visor_decoration: None,
            design_addons: None,
            accessories: None,
            shipping_method: None,
        }
    }

    pub fn domestic_request(&self) -> Result<DomesticQuoteRequest, QuoteError> {
        let style_number = self
            .style_number
            .clone()
            .filter(|style| !style.trim().is_empty())
            .ok_or(QuoteError::MissingField {
                field: "style_number",
                mode: QuoteType::Domestic,
            })?;

        Ok(DomesticQuoteRequest {
            design_number: None,
            style_number,
            quantity: self.quantity,
            front_decoration: self.front_decoration.clone(),
            left_decoration: self.left_decoration.clone(),
            right_decoration: self.right_decoration.clone(),
            back_decoration: self.back_decoration.clone(),
            shipping_speed: self
                .shipping_speed
                .clone()
                .unwrap_or_else(|| DEFAULT_SHIPPING_SPEED.to_string()),
            include_rope: self.include_rope.unwrap_or(false),
            num_dst_files: self.num_dst_files.unwrap_or(1),
        })
    }

    pub fn overseas_request(&self) -> Result<OverseasQuoteRequest, QuoteError> {
        let hat_type = self
            .hat_type
            .clone()
            .filter(|hat| !hat.trim().is_empty())
            .ok_or(QuoteError::MissingField {
                field: "hat_type",
                mode: QuoteType::Overseas,
            })?;

        Ok(OverseasQuoteRequest {
            design_number: None,
            hat_type,
            quantity: self.quantity,
            front_decoration: self.front_decoration.clone(),
            left_decoration: self.left_decoration.clone(),
            right_decoration: self.right_decoration.clone(),
            back_decoration: self.back_decoration.clone(),
            visor_decoration: self.visor_decoration.clone(),
            design_addons: self.design_addons.clone().unwrap_or_default(),
            accessories: self.accessories.clone().unwrap_or_default(),
            shipping_method: self
                .shipping_method
                .clone()
                .unwrap_or_else(|| DEFAULT_SHIPPING_METHOD.to_string()),
        })
    }
}

/// Partial update. Keys missing from the payload leave the stored value
/// alone; an explicit `null` clears an optional selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DesignQuotePatch {
    pub quote_type: Option<QuoteType>,
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "present")]
    pub front_decoration: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub left_decoration: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub right_decoration: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub back_decoration: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub style_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub shipping_speed: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub include_rope: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present")]
    pub num_dst_files: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub hat_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub visor_decoration: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub design_addons: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    pub accessories: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "present")]
    pub shipping_method: Option<Option<String>>,
}

/// Marks a key as present, keeping `null` as an inner `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl DesignQuotePatch {
    pub fn apply(self, selections: &mut QuoteSelections) {
        fn set<T>(slot: &mut Option<T>, value: Option<Option<T>>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(quote_type) = self.quote_type {
            selections.quote_type = quote_type;
        }
        if let Some(quantity) = self.quantity {
            selections.quantity = quantity;
        }
        set(&mut selections.front_decoration, self.front_decoration);
        set(&mut selections.left_decoration, self.left_decoration);
        set(&mut selections.right_decoration, self.right_decoration);
        set(&mut selections.back_decoration, self.back_decoration);
        set(&mut selections.style_number, self.style_number);
        set(&mut selections.shipping_speed, self.shipping_speed);
        set(&mut selections.include_rope, self.include_rope);
        set(&mut selections.num_dst_files, self.num_dst_files);
        set(&mut selections.hat_type, self.hat_type);
        set(&mut selections.visor_decoration, self.visor_decoration);
        set(&mut selections.design_addons, self.design_addons);
        set(&mut selections.accessories, self.accessories);
        set(&mut selections.shipping_method, self.shipping_method);
    }
}

/// Persisted quote with pricing cached in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignQuoteRecord {
    pub id: String,
    pub design_id: DesignId,
    pub selections: QuoteSelections,
    pub cached: CachedQuote,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DesignQuoteRecord {
    pub fn view(&self) -> DesignQuoteView {
        DesignQuoteView {
            id: self.id.clone(),
            design_id: self.design_id.clone(),
            selections: self.selections.clone(),
            cached_price_breaks: self.cached.price_breaks.clone(),
            cached_total: self.cached.total_cents.map(from_cents),
            cached_per_piece: self.cached.per_piece_cents.map(from_cents),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// API representation with cached amounts in dollars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignQuoteView {
    pub id: String,
    pub design_id: DesignId,
    #[serde(flatten)]
    pub selections: QuoteSelections,
    pub cached_price_breaks: serde_json::Value,
    pub cached_total: Option<f64>,
    pub cached_per_piece: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domestic_request_fills_defaults() {
        let request = QuoteSelections::domestic("250", 144)
            .domestic_request()
            .expect("builds request");
        assert_eq!(request.shipping_speed, DEFAULT_SHIPPING_SPEED);
        assert_eq!(request.num_dst_files, 1);
        assert!(!request.include_rope);
    }

    #[test]
    fn missing_mode_fields_are_reported() {
        let mut selections = QuoteSelections::domestic("250", 144);
        selections.quote_type = QuoteType::Overseas;
        assert_eq!(
            selections.overseas_request(),
            Err(QuoteError::MissingField {
                field: "hat_type",
                mode: QuoteType::Overseas,
            })
        );

        let blank = QuoteSelections::domestic("  ", 144);
        assert!(blank.domestic_request().is_err());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut selections = QuoteSelections {
            front_decoration: Some("Embroidery".to_string()),
            ..QuoteSelections::domestic("250", 144)
        };
        let patch: DesignQuotePatch =
            serde_json::from_str(r#"{"quantity": 500, "include_rope": true}"#).expect("parses");
        patch.apply(&mut selections);

        assert_eq!(selections.quantity, 500);
        assert_eq!(selections.include_rope, Some(true));
        assert_eq!(selections.front_decoration.as_deref(), Some("Embroidery"));
        assert_eq!(selections.style_number.as_deref(), Some("250"));
    }

    #[test]
    fn explicit_null_clears_selection() {
        let mut selections = QuoteSelections {
            front_decoration: Some("Embroidery".to_string()),
            back_decoration: Some("Screen Print".to_string()),
            ..QuoteSelections::domestic("250", 300)
        };
        let patch: DesignQuotePatch =
            serde_json::from_str(r#"{"front_decoration": null}"#).expect("parses");
        assert_eq!(patch.front_decoration, Some(None));
        assert_eq!(patch.back_decoration, None);

        patch.apply(&mut selections);
        assert_eq!(selections.front_decoration, None);
        assert_eq!(selections.back_decoration.as_deref(), Some("Screen Print"));
    }

    #[test]
    fn view_converts_cents_to_dollars() {
        let now = Utc::now();
        let record = DesignQuoteRecord {
            id: "dq-000001".to_string(),
            design_id: DesignId("design-1".to_string()),
            selections: QuoteSelections::domestic("250", 300),
            cached: CachedQuote {
                price_breaks: serde_json::Value::Array(Vec::new()),
                total_cents: Some(192_500),
                per_piece_cents: Some(630),
            },
            created_at: now,
            updated_at: now,
        };
        let view = record.view();
        assert_eq!(view.cached_total, Some(1925.0));
        assert_eq!(view.cached_per_piece, Some(6.3));

        let json = serde_json::to_value(&view).expect("serializes");
        assert_eq!(json["quote_type"], "domestic");
        assert_eq!(json["style_number"], "250");
        assert_eq!(json["design_id"], "design-1");
    }
}
