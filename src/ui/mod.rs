/// Presentation adapter: draws what `view::render` hands it.
pub mod panels;
pub mod plot;
pub mod table;
