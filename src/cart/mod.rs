pub mod session;
pub mod state;

pub use session::{CART_STATE_KEY, SessionCart};
pub use state::{CartEntry, CartItem, CartState};
