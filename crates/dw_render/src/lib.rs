pub mod card;
pub mod html;
pub mod slots;

pub use card::Card;
pub use html::{escape, HtmlRenderer, PageRenderer};
pub use slots::{
    build_model_panels, build_page, FeaturedMode, ModelPanel, PageConfig, PageSlots, MODEL_PANELS,
};

pub mod prelude {
    pub use crate::card::Card;
    pub use crate::html::{HtmlRenderer, PageRenderer};
    pub use crate::slots::{build_model_panels, build_page, PageConfig, PageSlots};
}
