pub(crate) mod bitmap_font;
pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod fonts;
pub(crate) mod sticker;
pub(crate) mod text_layout;
