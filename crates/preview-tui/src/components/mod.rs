pub mod address_bar;
pub mod link_preview_card;
