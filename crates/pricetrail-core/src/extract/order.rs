use serde_json::{Number, Value};

#[derive(Debug, Clone)]
pub(crate) struct ParsedOrder {
    pub(crate) order_id: String,
    pub(crate) title: String,
    pub(crate) items: Vec<OrderItem>,
    pub(crate) items_missing_fields: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct OrderItem {
    pub(crate) name: String,
    pub(crate) quantity: Number,
    pub(crate) price: Number,
}

/// Navigates `data.order.{id, title, groups_2101}` in a decoded response
/// body and flattens every group's item list. Returns None when the order
/// id or title is absent. Items missing a name, quantity, or line price
/// are counted but otherwise dropped without a report.
pub(crate) fn parse_order(body: &Value) -> Option<ParsedOrder> {
    let order = body.pointer("/data/order")?;
    let order_id = scalar_string(order.get("id"))?;
    let title = scalar_string(order.get("title"))?;

    let mut items = Vec::new();
    let mut items_missing_fields = 0i64;
    if let Some(groups) = order.get("groups_2101").and_then(Value::as_array) {
        for group in groups {
            let Some(group_items) = group.get("items").and_then(Value::as_array) else {
                continue;
            };
            for item in group_items {
                let name = item
                    .pointer("/productInfo/name")
                    .and_then(Value::as_str)
                    .filter(|value| !value.trim().is_empty());
                let quantity = item.get("quantity").and_then(Value::as_number);
                let price = item
                    .pointer("/priceInfo/linePrice/value")
                    .and_then(Value::as_number);

                match (name, quantity, price) {
                    (Some(name), Some(quantity), Some(price)) => items.push(OrderItem {
                        name: name.to_string(),
                        quantity: quantity.clone(),
                        price: price.clone(),
                    }),
                    _ => items_missing_fields += 1,
                }
            }
        }
    }

    Some(ParsedOrder {
        order_id,
        title,
        items,
        items_missing_fields,
    })
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    let current = value?;
    if let Some(text) = current.as_str() {
        if text.trim().is_empty() {
            return None;
        }
        return Some(text.to_string());
    }
    if current.is_number() {
        return Some(current.to_string());
    }
    None
}
