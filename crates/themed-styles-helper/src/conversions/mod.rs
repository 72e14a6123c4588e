pub mod style_references;
pub mod themed_styles;
