use std::sync::Arc;

use capquote::pricing::{
    DomesticQuoteRequest, OverseasQuoteRequest, Quote, QuoteError, RateCard, RateCardError,
};
use capquote::QuoteEngine;

const FIXTURE_RATE_CARD: &str = r#"{
  "domestic": {
    "quantity_breaks": [144, 288, 576],
    "styles": {
      "250": { "name": "Classic Snapback", "collection": "Core" }
    },
    "blank_prices": {
      "250": { "144": 5.00, "288": 4.50, "576": 4.10 }
    },
    "front_decoration_prices": {
      "Embroidery": { "144": 2.00, "288": 1.80, "576": 1.60 }
    },
    "rush_fees": { "Standard": 0.0 },
    "addons": { "Rope": 0.75 },
    "additional_charges": {
      "Embroidery Digitizing Fee": { "144": 40.0, "288": 35.0, "576": 0.0 }
    }
  },
  "overseas": {
    "quantity_breaks": [144, 288, 500, 1000],
    "hat_types": {
      "Classic": { "prices": { "144": 3.20, "288": 3.00, "500": 2.80, "1000": 2.60 } }
    },
    "front_decoration_prices": {
      "Embroidery": { "144": 1.10, "288": 1.00, "500": 0.90, "1000": 0.80 }
    },
    "design_addons": {
      "3D Embroidery": { "500": 0.60, "1000": 0.50 }
    },
    "shipping": {
      "FOB CA": { "144": 0.40, "288": 0.40, "500": 0.35, "1000": 0.30 }
    }
  }
}"#;

fn fixture_engine() -> QuoteEngine {
    let rates = RateCard::from_json(FIXTURE_RATE_CARD).expect("fixture rate card parses");
    QuoteEngine::new(Arc::new(rates))
}

#[test]
fn domestic_order_between_breaks_prices_at_lower_break() {
    let engine = fixture_engine();
    let request = DomesticQuoteRequest {
        front_decoration: Some("Embroidery".to_string()),
        shipping_speed: "Standard".to_string(),
        ..DomesticQuoteRequest::new("250", 300)
    };

    let quote = engine.domestic(&request).expect("quotes");
    let breaks: Vec<u32> = quote
        .price_breaks
        .iter()
        .map(|row| row.quantity_break)
        .collect();
    assert_eq!(breaks, vec![144, 288]);

    let applicable = quote.applicable_break().expect("applicable break");
    assert_eq!(applicable.quantity_break, 288);
    assert_eq!(applicable.per_piece_price, 6.30);
    assert_eq!(applicable.digitizing_fee, 35.0);
    assert_eq!(applicable.total, 1925.00);

    let summary = Quote::from(quote).summary();
    assert_eq!(summary.total, Some(1925.00));
    assert_eq!(summary.per_piece_price, Some(6.30));
}

#[test]
fn overseas_addon_gates_breaks_below_its_moq() {
    let engine = fixture_engine();
    let request = OverseasQuoteRequest {
        front_decoration: Some("Embroidery".to_string()),
        design_addons: vec!["3D Embroidery".to_string()],
        ..OverseasQuoteRequest::new("Classic", 600)
    };

    let quote = engine.overseas(&request).expect("quotes");
    assert_eq!(quote.price_breaks.len(), 4);

    for row in &quote.price_breaks {
        if row.quantity_break < 500 {
            assert!(!row.meets_moq(), "break {} should be unpriced", row.quantity_break);
        } else {
            assert!(row.meets_moq(), "break {} should be priced", row.quantity_break);
        }
    }

    let applicable = quote.applicable_break().expect("break 500 meets MOQ");
    assert_eq!(applicable.quantity_break, 500);
    assert_eq!(applicable.hat_subtotal, Some(4.30));
    assert_eq!(applicable.per_piece_price, Some(4.65));
    assert_eq!(applicable.total, Some(2790.00));
}

#[test]
fn overseas_order_below_every_priced_break_has_no_summary() {
    let engine = fixture_engine();
    let request = OverseasQuoteRequest {
        design_addons: vec!["3D Embroidery".to_string()],
        ..OverseasQuoteRequest::new("Classic", 300)
    };

    let quote: Quote = engine.overseas(&request).expect("quotes").into();
    let summary = quote.summary();
    assert!(!summary.is_available());
    assert_eq!(summary.total, None);
}

#[test]
fn unknown_catalog_keys_are_rejected() {
    let engine = fixture_engine();

    let error = engine
        .domestic(&DomesticQuoteRequest::new("NONEXISTENT-999", 100))
        .expect_err("unknown style");
    assert_eq!(error, QuoteError::UnknownStyle("NONEXISTENT-999".to_string()));

    let error = engine
        .overseas(&OverseasQuoteRequest::new("Nonexistent", 500))
        .expect_err("unknown hat type");
    assert_eq!(error, QuoteError::UnknownHatType("Nonexistent".to_string()));
}

#[test]
fn rate_card_loads_from_disk() {
    let path = std::env::temp_dir().join(format!("capquote-rates-{}.json", std::process::id()));
    std::fs::write(&path, FIXTURE_RATE_CARD).expect("writes fixture");

    let rates = RateCard::from_path(&path).expect("loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(rates.domestic.quantity_breaks, vec![144, 288, 576]);
    assert!(rates.overseas.hat_types.contains_key("Classic"));
}

#[test]
fn rate_card_with_gaps_in_hat_pricing_is_rejected() {
    let broken = FIXTURE_RATE_CARD.replace(r#""1000": 2.60"#, r#""999": 2.60"#);

    match RateCard::from_json(&broken) {
        Err(RateCardError::IncompleteHatPricing {
            hat_type,
            quantity_break,
        }) => {
            assert_eq!(hat_type, "Classic");
            assert_eq!(quantity_break, 1000);
        }
        other => panic!("expected incomplete hat pricing, got {other:?}"),
    }
}
