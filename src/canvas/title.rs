use crate::core::{ParamValue, ValueKind};

use super::{CanvasComponent, ParameterDefinition};

pub const CANVAS_TITLE: &str = "CanvasTitle";

/// Hex, functional (`rgb`/`hsl`/`hsv` with optional alpha) and CSS variable colors.
pub const COLOR_PATTERNS: [&str; 3] = [
    r"#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})",
    r"(rgb|hsl|hsv)a?\([\d.]+%?(,[\d.]+%?){2,3}\)",
    r"var\(\-\-.*\)",
];

/// Builds the title component with its default layout parameters.
#[must_use]
pub fn title_component() -> CanvasComponent {
    let mut component = CanvasComponent::new(CANVAS_TITLE);
    component
        .define(
            "title_text",
            ParameterDefinition::new(ValueKind::Str, "")
                .with_layout_path("layout.title.text")
                .with_description("Sets the plot's title."),
        )
        .define(
            "title_font_family",
            ParameterDefinition::new(ValueKind::Str, "Open Sans")
                .with_layout_path("layout.title.font.family")
                .with_description("HTML font family applied to the title."),
        )
        .define(
            "title_font_size",
            ParameterDefinition::new(ValueKind::Int, ParamValue::None)
                .with_layout_path("layout.title.font.size")
                .with_description("Sets font size.")
                .with_min(1.0),
        )
        .define(
            "title_font_color",
            ParameterDefinition::new(ValueKind::Str, ParamValue::None)
                .with_layout_path("layout.title.font.color")
                .with_description("Sets font color.")
                .with_patterns(COLOR_PATTERNS),
        )
        .define(
            "title_x",
            position("layout.title.x", "Sets the x position in normalized coordinates."),
        )
        .define(
            "title_y",
            position("layout.title.y", "Sets the y position in normalized coordinates."),
        )
        .define(
            "title_xref",
            reference("layout.title.xref", "Sets the container `x` refers to."),
        )
        .define(
            "title_yref",
            reference("layout.title.yref", "Sets the container `y` refers to."),
        )
        .define(
            "title_xanchor",
            ParameterDefinition::new(ValueKind::Str, "auto")
                .with_layout_path("layout.title.xanchor")
                .with_description("Sets the title's horizontal alignment.")
                .with_allowed(["auto", "left", "center", "right"]),
        )
        .define(
            "title_yanchor",
            ParameterDefinition::new(ValueKind::Str, "auto")
                .with_layout_path("layout.title.yanchor")
                .with_description("Sets the title's vertical alignment.")
                .with_allowed(["auto", "top", "middle", "bottom"]),
        )
        .define("title_pad_top", padding("layout.title.pad.t", "top"))
        .define("title_pad_bottom", padding("layout.title.pad.b", "bottom"))
        .define("title_pad_left", padding("layout.title.pad.l", "left"));
    component
}

fn position(path: &str, description: &str) -> ParameterDefinition {
    ParameterDefinition::new(ValueKind::Float, 0.5)
        .with_layout_path(path)
        .with_description(description)
        .with_min(0.0)
        .with_max(1.0)
}

fn reference(path: &str, description: &str) -> ParameterDefinition {
    ParameterDefinition::new(ValueKind::Str, "container")
        .with_layout_path(path)
        .with_description(description)
        .with_allowed(["container", "paper"])
}

fn padding(path: &str, side: &str) -> ParameterDefinition {
    ParameterDefinition::new(ValueKind::Int, 0)
        .with_layout_path(path)
        .with_description(format!("The amount of padding (in px) along the {side} of the component."))
        .with_min(0.0)
}
