//! Subcommand handlers.
//!
//! Each handler drives one store on the shared application state and
//! renders the resulting state to the terminal, returning `true` on
//! success.

pub mod cart;
pub mod catalog;

use bosanoga_core::CatalogItem;

pub(crate) fn print_item_row(item: &CatalogItem) {
    println!("{:>6}  {:<42}  {}", item.id.as_i32(), item.title, item.price);
}
