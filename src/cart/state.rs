use serde::{Deserialize, Serialize};

/// One line in the cart: a unique product title and its accumulated count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub title: String,
    pub price: f64,
    pub image: String,
    pub count: u32,
}

/// Basic item info sent when adding to the cart.
///
/// The count is managed inside the cart itself; callers never supply it.
/// Adding a title that is already present increments the existing line
/// instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl CartEntry {
    pub fn new(title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// The authoritative in-memory cart.
///
/// Items keep insertion order and are keyed by title. The two aggregates
/// are updated on every transition so that at any point:
///
/// - `total_quantity == sum(item.count)`
/// - `total_amount == sum(item.price * item.count)` (float tolerance)
/// - no two items share a title
/// - every stored item has `count >= 1`
///
/// All four transitions are total: any input produces a valid next state.
/// Field names serialize in camelCase, matching the persisted snapshot
/// shape (`items`, `totalAmount`, `totalQuantity`).
///
/// # Examples
///
/// ```
/// use shopfront::cart::{CartEntry, CartState};
///
/// let mut cart = CartState::new();
/// cart.add(CartEntry::new("Mug", 12.5, "https://img/mug.png"));
/// cart.add(CartEntry::new("Mug", 12.5, "https://img/mug.png"));
///
/// assert_eq!(cart.total_quantity(), 2);
/// assert_eq!(cart.items()[0].count, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    total_amount: f64,
    total_quantity: u32,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `entry` to the cart.
    ///
    /// If a line with the same title exists its count is incremented,
    /// otherwise a new line with count 1 is appended. Price is taken
    /// as-is; validating it belongs to upstream callers.
    pub fn add(&mut self, entry: CartEntry) {
        match self.find_mut(&entry.title) {
            Some(item) => item.count += 1,
            None => self.items.push(CartItem {
                title: entry.title,
                price: entry.price,
                image: entry.image,
                count: 1,
            }),
        }
        self.total_amount += entry.price;
        self.total_quantity += 1;
    }

    /// Removes the entire line with the given title, regardless of count.
    ///
    /// Unknown titles are a no-op, not an error.
    pub fn remove(&mut self, title: &str) {
        if let Some(pos) = self.items.iter().position(|item| item.title == title) {
            let item = self.items.remove(pos);
            self.total_amount -= item.price * item.count as f64;
            self.total_quantity -= item.count;
        }
    }

    /// Sets the count of the line with the given title.
    ///
    /// Unknown titles are a no-op. A `new_count` of 0 removes the line;
    /// a count never stays at zero.
    pub fn update_quantity(&mut self, title: &str, new_count: u32) {
        if new_count == 0 {
            self.remove(title);
            return;
        }
        if let Some(item) = self.find_mut(title) {
            let delta = new_count as i64 - item.count as i64;
            item.count = new_count;
            let price = item.price;
            self.total_amount += price * delta as f64;
            self.total_quantity = (self.total_quantity as i64 + delta) as u32;
        }
    }

    /// Resets the cart to empty, unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total_amount = 0.0;
        self.total_quantity = 0;
    }

    /// Cart lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of `price * count` over all lines.
    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Sum of `count` over all lines.
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, title: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn entry(title: &str, price: f64) -> CartEntry {
        CartEntry::new(title, price, format!("https://img/{title}.png"))
    }

    #[test]
    fn test_add_distinct_titles() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 20.0));
        cart.add(entry("C", 5.5));

        assert_eq!(cart.total_quantity(), 3);
        assert!((cart.total_amount() - 35.5).abs() < EPS);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_add_same_title_accumulates() {
        let mut cart = CartState::new();
        for _ in 0..5 {
            cart.add(entry("A", 10.0));
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].count, 5);
        assert_eq!(cart.total_quantity(), 5);
        assert!((cart.total_amount() - 50.0).abs() < EPS);
    }

    #[test]
    fn test_add_twice_scenario() {
        let mut cart = CartState::new();
        cart.add(entry("A", 29.99));
        cart.add(entry("A", 29.99));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].title, "A");
        assert_eq!(cart.items()[0].count, 2);
        assert!((cart.total_amount() - 59.98).abs() < EPS);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_remove_whole_line() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 20.0));
        cart.remove("A");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].title, "B");
        assert!((cart.total_amount() - 20.0).abs() < EPS);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 20.0));

        cart.remove("A");
        let after_first = cart.clone();
        cart.remove("A");

        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_add_then_remove_returns_to_empty() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.remove("A");

        assert!(cart.is_empty());
        assert!(cart.total_amount().abs() < EPS);
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart, CartState::new());
    }

    #[test]
    fn test_remove_unknown_title_is_noop() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        let before = cart.clone();

        cart.remove("missing");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_delta() {
        let mut cart = CartState::new();
        cart.add(entry("A", 7.0));

        cart.update_quantity("A", 4);

        assert_eq!(cart.items()[0].count, 4);
        assert_eq!(cart.total_quantity(), 4);
        assert!((cart.total_amount() - 28.0).abs() < EPS);
    }

    #[test]
    fn test_update_quantity_down() {
        let mut cart = CartState::new();
        for _ in 0..5 {
            cart.add(entry("A", 3.0));
        }

        cart.update_quantity("A", 2);

        assert_eq!(cart.total_quantity(), 2);
        assert!((cart.total_amount() - 6.0).abs() < EPS);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 20.0));

        cart.update_quantity("A", 0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].title, "B");
        assert!((cart.total_amount() - 20.0).abs() < EPS);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn test_update_quantity_unknown_title_is_noop() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        let before = cart.clone();

        cart.update_quantity("missing", 4);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 20.0));
        cart.update_quantity("B", 7);

        cart.clear();

        assert_eq!(cart, CartState::new());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartState::new();
        cart.add(entry("C", 1.0));
        cart.add(entry("A", 1.0));
        cart.add(entry("B", 1.0));
        cart.add(entry("A", 1.0));

        let titles: Vec<&str> = cart.items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_invariants_hold_after_mixed_transitions() {
        let mut cart = CartState::new();
        cart.add(entry("A", 10.0));
        cart.add(entry("B", 2.5));
        cart.add(entry("A", 10.0));
        cart.update_quantity("B", 4);
        cart.remove("A");
        cart.add(entry("C", 0.99));

        let quantity: u32 = cart.items().iter().map(|i| i.count).sum();
        let amount: f64 = cart.items().iter().map(|i| i.price * i.count as f64).sum();
        assert_eq!(cart.total_quantity(), quantity);
        assert!((cart.total_amount() - amount).abs() < EPS);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = CartState::new();
        cart.add(entry("A", 29.99));
        cart.add(entry("B", 4.5));
        cart.add(entry("A", 29.99));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut cart = CartState::new();
        cart.add(entry("A", 1.0));

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        assert!(json.get("totalAmount").is_some());
        assert!(json.get("totalQuantity").is_some());
        assert!(json.get("items").is_some());
    }
}
