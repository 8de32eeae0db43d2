//! Shared fixtures for unit tests.

use crate::config::Config;

/// Config with every provider pointed at `base_url` (usually a wiremock server)
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        google_translate_key: "test-google-key".to_string(),
        translate_api_url: format!("{}/language/translate/v2", base_url),
        translate_model: "nmt".to_string(),
        api_ai_key: "test-apiai-key".to_string(),
        intent_api_url: format!("{}/v1/query", base_url),
        intent_api_version: "20150910".to_string(),
        flights_api_url: format!("{}/flights", base_url),
        sygic_api_key: "test-sygic-key".to_string(),
        places_api_url: format!("{}/places/list", base_url),
        hotels_api_url: format!("{}/hotels/list", base_url),
        api_key: None,
        port: 8080,
    }
}

pub fn translate_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "translations": [
                { "translatedText": text }
            ]
        }
    })
}

/// Raw Kiwi flight record
pub fn flight_json(city_from: &str, city_to: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "aTime": 1710525900,
        "dTime": 1710498600,
        "booking_token": format!("token-{}-{}", city_from, city_to),
        "cityFrom": city_from,
        "cityTo": city_to,
        "countryFrom": { "code": "PE", "name": "Peru" },
        "countryTo": { "code": "FR", "name": "France" },
        "price": price,
        "routes": [["LIM", "CDG"]],
        "route": [
            { "flyFrom": "LIM", "flyTo": "MAD" },
            { "flyFrom": "MAD", "flyTo": "CDG" }
        ]
    })
}

pub fn place_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "city:14",
        "name": name,
        "level": "city",
        "bounding_box": {
            "south": 48.8155755,
            "west": 2.2241219,
            "north": 48.9021449,
            "east": 2.4697602
        }
    })
}

pub fn hotel_json(index: usize) -> serde_json::Value {
    serde_json::json!({
        "place_id": format!("poi:{}", index),
        "name": format!("Hotel {}", index),
        "price": 100 + index
    })
}
