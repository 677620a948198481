use serde_json::{json, Map, Value};

/// Builds listing create bodies in the JSON shape the API accepts.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    fields: Map<String, Value>,
}

impl Default for ListingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingBuilder {
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("propertytype".into(), json!("Residential"));
        fields.insert(
            "googleaddress".into(),
            json!({ "lat": "12.9716", "long": "77.5946" }),
        );
        Self { fields }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn city(self, city: &str) -> Self {
        self.set("city", city)
    }

    pub fn price(self, price: &str) -> Self {
        self.set("expect_price", price)
    }

    pub fn owner(self, customer_id: &str) -> Self {
        self.set("customerId", customer_id)
            .set("customerName", format!("Owner {customer_id}"))
    }

    pub fn amenities(self, names: &[&str]) -> Self {
        let list: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
        self.set("amenities", Value::Array(list))
    }

    pub fn nearby(self, places: &[(&str, &str, &str)]) -> Self {
        let list: Vec<Value> = places
            .iter()
            .map(|(category, name, distance)| {
                json!({ "category": category, "place_name": name, "distance": distance })
            })
            .collect();
        self.set("nearbyplace", Value::Array(list))
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}
