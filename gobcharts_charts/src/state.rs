// Copyright 2026 the GobCharts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `<GobChart>` XML state round-trip.
//!
//! Charts persist their full visual state as a small XML document:
//!
//! ```xml
//! <GobChart>
//!   <View>
//!     <Header>..label details..</Header>
//!     <YLabel>..</YLabel>
//!     <XLabel>..</XLabel>
//!     <ChartType value="0"/>
//!   </View>
//!   <Data>
//!     <Item category="A" value="10"/>
//!   </Data>
//!   <ToolsWidget>..range, grid and colour settings..</ToolsWidget>
//! </GobChart>
//! ```
//!
//! This module defines the typed document model and its reader/writer. All
//! numeric attribute parsing is best-effort: malformed fields fall back to
//! documented defaults rather than failing the whole restore. Structural
//! problems (not XML, missing root, unknown chart type) fail with
//! [`StateError`].

use peniko::Color;
use peniko::color::palette::css;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use thiserror::Error;

use crate::fit_label::HAlign;
use crate::variant::ChartKind;
use gobcharts_scene::LineStyle;

/// Errors surfaced while reading a persisted chart document.
#[derive(Debug, Error)]
pub enum StateError {
    /// The document is not well-formed XML.
    #[error("malformed chart XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// The document has no `<GobChart>` root element.
    #[error("missing <GobChart> root element")]
    MissingRoot,
    /// The `<ChartType>` tag is absent or carries an unknown value.
    #[error("missing or unknown chart type tag {0}")]
    UnknownChartType(i64),
}

/// Persisted state of one auto-fitting label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelState {
    /// Font descriptor (see `gobcharts_text::TextStyle::to_descriptor`).
    pub font: String,
    /// Text colour.
    pub colour: Color,
    /// User-preferred maximum font size.
    pub max_font_size: f64,
    /// Text content.
    pub text: String,
    /// Horizontal alignment.
    pub alignment: HAlign,
}

/// One persisted data row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataItem {
    /// Category text.
    pub category: String,
    /// Value text.
    pub value: String,
}

/// Persisted view section: the three labels plus the chart kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Header label state, if present in the document.
    pub header: Option<LabelState>,
    /// Y-axis label state, if present in the document.
    pub y_label: Option<LabelState>,
    /// X-axis label state, if present in the document.
    pub x_label: Option<LabelState>,
    /// The chart kind tag.
    pub chart_type: ChartKind,
}

/// Persisted value-range filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeState {
    /// `true` when the whole value range is shown (no filter).
    pub total: bool,
    /// Lower bound, meaningful when `total` is `false`.
    pub lower: f64,
    /// Upper bound, meaningful when `total` is `false`.
    pub upper: f64,
}

impl Default for RangeState {
    fn default() -> Self {
        Self {
            total: true,
            lower: 0.0,
            upper: 0.0,
        }
    }
}

/// Persisted grid settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridState {
    /// Explicit grid colour, when one was chosen.
    pub colour: Option<Color>,
    /// Whether vertical grid lines are on.
    pub vertical: bool,
    /// Vertical line count.
    pub vertical_lines: u32,
    /// Whether horizontal grid lines are on.
    pub horizontal: bool,
    /// Horizontal line count.
    pub horizontal_lines: u32,
    /// Grid line style.
    pub style: LineStyle,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            colour: None,
            vertical: false,
            vertical_lines: 0,
            horizontal: false,
            horizontal_lines: 0,
            style: LineStyle::Dot,
        }
    }
}

/// Persisted tool settings: chart colour, range filter and grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ToolsState {
    /// Fixed chart colour, when fixed-colour mode is on.
    pub chart_colour: Option<Color>,
    /// The value-range filter.
    pub range: RangeState,
    /// The grid configuration.
    pub grid: GridState,
}

/// A complete persisted chart document.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    /// The view section.
    pub view: ViewState,
    /// The data section; `None` when data was not persisted.
    pub data: Option<Vec<DataItem>>,
    /// The tool settings section; `None` when absent from the document.
    pub tools: Option<ToolsState>,
}

fn alignment_tag(alignment: HAlign) -> &'static str {
    match alignment {
        HAlign::Left => "left",
        HAlign::Right => "right",
        HAlign::Centre => "centre",
    }
}

fn alignment_from_tag(tag: &str) -> HAlign {
    match tag {
        "left" => HAlign::Left,
        "right" => HAlign::Right,
        // Unknown alignments fall back to the default.
        _ => HAlign::Centre,
    }
}

fn style_tag(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "solid",
        LineStyle::Dot => "dot",
        LineStyle::Dash => "dash",
    }
}

fn style_from_tag(tag: &str) -> LineStyle {
    match tag {
        "solid" => LineStyle::Solid,
        "dot" => LineStyle::Dot,
        "dash" => LineStyle::Dash,
        _ => LineStyle::Solid,
    }
}

// `Display` for f64 already prints the shortest round-trip form.
fn format_f64(value: f64) -> String {
    value.to_string()
}

// ---------------------------------------------------------------------------
// Writing

type XmlWriter = Writer<Vec<u8>>;

fn write_colour_element(writer: &mut XmlWriter, name: &str, colour: Color) {
    let rgba = colour.to_rgba8();
    let mut el = BytesStart::new(name);
    el.push_attribute(("red", rgba.r.to_string().as_str()));
    el.push_attribute(("green", rgba.g.to_string().as_str()));
    el.push_attribute(("blue", rgba.b.to_string().as_str()));
    let _ = writer.write_event(Event::Empty(el));
}

fn write_label(writer: &mut XmlWriter, name: &str, label: &LabelState) {
    let _ = writer.write_event(Event::Start(BytesStart::new(name)));
    let _ = writer.write_event(Event::Start(BytesStart::new("LabelDetails")));

    let mut font = BytesStart::new("Font");
    font.push_attribute(("value", label.font.as_str()));
    let _ = writer.write_event(Event::Empty(font));

    write_colour_element(writer, "FontColour", label.colour);

    let mut max_font = BytesStart::new("MaxFontSize");
    max_font.push_attribute(("value", format_f64(label.max_font_size).as_str()));
    let _ = writer.write_event(Event::Empty(max_font));

    let mut text = BytesStart::new("Text");
    text.push_attribute(("value", label.text.as_str()));
    let _ = writer.write_event(Event::Empty(text));

    let mut align = BytesStart::new("Alignment");
    align.push_attribute(("value", alignment_tag(label.alignment)));
    let _ = writer.write_event(Event::Empty(align));

    let _ = writer.write_event(Event::End(BytesEnd::new("LabelDetails")));
    let _ = writer.write_event(Event::End(BytesEnd::new(name)));
}

fn write_tools(writer: &mut XmlWriter, tools: &ToolsState) {
    let _ = writer.write_event(Event::Start(BytesStart::new("ToolsWidget")));

    let mut chart = BytesStart::new("Chart");
    match tools.chart_colour {
        Some(colour) => {
            chart.push_attribute(("fixed", "true"));
            let _ = writer.write_event(Event::Start(chart));
            write_colour_element(writer, "ChartColour", colour);
            let _ = writer.write_event(Event::End(BytesEnd::new("Chart")));
        }
        None => {
            chart.push_attribute(("fixed", "false"));
            let _ = writer.write_event(Event::Empty(chart));
        }
    }

    let mut range = BytesStart::new("Range");
    if tools.range.total {
        range.push_attribute(("total", "true"));
    } else {
        range.push_attribute(("total", "false"));
        range.push_attribute(("lower", format_f64(tools.range.lower).as_str()));
        range.push_attribute(("upper", format_f64(tools.range.upper).as_str()));
    }
    let _ = writer.write_event(Event::Empty(range));

    let mut grid = BytesStart::new("Grid");
    grid.push_attribute(("fixedColour", bool_tag(tools.grid.colour.is_some())));
    if tools.grid.vertical {
        grid.push_attribute(("vertical", "true"));
        grid.push_attribute(("vertlines", tools.grid.vertical_lines.to_string().as_str()));
    } else {
        grid.push_attribute(("vertical", "false"));
    }
    if tools.grid.horizontal {
        grid.push_attribute(("horizontal", "true"));
        grid.push_attribute(("horlines", tools.grid.horizontal_lines.to_string().as_str()));
    } else {
        grid.push_attribute(("horizontal", "false"));
    }
    grid.push_attribute(("style", style_tag(tools.grid.style)));

    match tools.grid.colour {
        Some(colour) => {
            let _ = writer.write_event(Event::Start(grid));
            write_colour_element(writer, "GridColour", colour);
            let _ = writer.write_event(Event::End(BytesEnd::new("Grid")));
        }
        None => {
            let _ = writer.write_event(Event::Empty(grid));
        }
    }

    let _ = writer.write_event(Event::End(BytesEnd::new("ToolsWidget")));
}

fn bool_tag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Serializes a chart state document.
#[must_use]
pub fn write(state: &ChartState) -> String {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let _ = writer.write_event(Event::Start(BytesStart::new("GobChart")));
    let _ = writer.write_event(Event::Start(BytesStart::new("View")));

    if let Some(label) = &state.view.header {
        write_label(&mut writer, "Header", label);
    }
    if let Some(label) = &state.view.y_label {
        write_label(&mut writer, "YLabel", label);
    }
    if let Some(label) = &state.view.x_label {
        write_label(&mut writer, "XLabel", label);
    }

    let mut chart_type = BytesStart::new("ChartType");
    chart_type.push_attribute(("value", state.view.chart_type.type_tag().to_string().as_str()));
    let _ = writer.write_event(Event::Empty(chart_type));
    let _ = writer.write_event(Event::End(BytesEnd::new("View")));

    if let Some(data) = &state.data {
        let _ = writer.write_event(Event::Start(BytesStart::new("Data")));
        for item in data {
            let mut el = BytesStart::new("Item");
            el.push_attribute(("category", item.category.as_str()));
            el.push_attribute(("value", item.value.as_str()));
            let _ = writer.write_event(Event::Empty(el));
        }
        let _ = writer.write_event(Event::End(BytesEnd::new("Data")));
    }

    if let Some(tools) = &state.tools {
        write_tools(&mut writer, tools);
    }

    let _ = writer.write_event(Event::End(BytesEnd::new("GobChart")));

    String::from_utf8(writer.into_inner()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Reading

fn attr(el: &BytesStart<'_>, name: &str) -> Option<String> {
    el.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn colour_from_attrs(el: &BytesStart<'_>) -> Color {
    let component = |name: &str| {
        attr(el, name)
            .and_then(|v| v.parse::<u8>().ok())
            .unwrap_or(0)
    };
    Color::from_rgb8(component("red"), component("green"), component("blue"))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LabelSlot {
    Header,
    YLabel,
    XLabel,
}

#[derive(Default)]
struct LabelBuilder {
    font: Option<String>,
    colour: Option<Color>,
    max_font_size: Option<f64>,
    text: Option<String>,
    alignment: Option<HAlign>,
}

impl LabelBuilder {
    fn build(self) -> LabelState {
        LabelState {
            font: self.font.unwrap_or_default(),
            colour: self.colour.unwrap_or(css::BLACK),
            max_font_size: self.max_font_size.unwrap_or(11.0),
            text: self.text.unwrap_or_default(),
            alignment: self.alignment.unwrap_or_default(),
        }
    }
}

/// Parses a chart state document.
///
/// Attribute-level problems degrade to defaults; structural problems fail.
pub fn parse(xml: &str) -> Result<ChartState, StateError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_root = false;
    let mut header = None;
    let mut y_label = None;
    let mut x_label = None;
    let mut chart_type: Option<ChartKind> = None;
    let mut chart_type_tag: i64 = -1;
    let mut data: Option<Vec<DataItem>> = None;
    let mut tools: Option<ToolsState> = None;

    let mut in_tools = false;
    let mut in_grid = false;
    let mut in_chart = false;
    let mut label_slot: Option<LabelSlot> = None;
    let mut label = LabelBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(el) | Event::Empty(el) => {
                match el.name().as_ref() {
                    b"GobChart" => saw_root = true,
                    b"Header" => {
                        label_slot = Some(LabelSlot::Header);
                        label = LabelBuilder::default();
                    }
                    b"YLabel" => {
                        label_slot = Some(LabelSlot::YLabel);
                        label = LabelBuilder::default();
                    }
                    b"XLabel" => {
                        label_slot = Some(LabelSlot::XLabel);
                        label = LabelBuilder::default();
                    }
                    b"Font" if label_slot.is_some() => {
                        label.font = attr(&el, "value");
                    }
                    b"FontColour" if label_slot.is_some() => {
                        label.colour = Some(colour_from_attrs(&el));
                    }
                    b"MaxFontSize" if label_slot.is_some() => {
                        label.max_font_size =
                            attr(&el, "value").and_then(|v| v.parse::<f64>().ok());
                    }
                    b"Text" if label_slot.is_some() => {
                        label.text = attr(&el, "value");
                    }
                    b"Alignment" if label_slot.is_some() => {
                        label.alignment =
                            attr(&el, "value").map(|v| alignment_from_tag(&v));
                    }
                    b"ChartType" => {
                        chart_type_tag = attr(&el, "value")
                            .and_then(|v| v.parse::<i64>().ok())
                            .unwrap_or(-1);
                        chart_type = i32::try_from(chart_type_tag)
                            .ok()
                            .and_then(ChartKind::from_type_tag);
                    }
                    b"Data" => {
                        data.get_or_insert_with(Vec::new);
                    }
                    b"Item" => {
                        if let Some(items) = data.as_mut() {
                            items.push(DataItem {
                                category: attr(&el, "category")
                                    .unwrap_or_else(|| "Uncategorised".to_owned()),
                                value: attr(&el, "value").unwrap_or_else(|| "0.0".to_owned()),
                            });
                        }
                    }
                    b"ToolsWidget" => {
                        in_tools = true;
                        tools.get_or_insert_with(ToolsState::default);
                    }
                    b"Chart" if in_tools => {
                        in_chart = true;
                        if attr(&el, "fixed").as_deref() == Some("true")
                            && let Some(tools) = tools.as_mut()
                        {
                            // The concrete colour follows in a child element.
                            tools.chart_colour = Some(css::BLACK);
                        }
                    }
                    b"ChartColour" if in_chart => {
                        if let Some(tools) = tools.as_mut()
                            && tools.chart_colour.is_some()
                        {
                            tools.chart_colour = Some(colour_from_attrs(&el));
                        }
                    }
                    b"Range" if in_tools => {
                        if let Some(tools) = tools.as_mut() {
                            if attr(&el, "total").as_deref() == Some("true") {
                                tools.range = RangeState::default();
                            } else {
                                tools.range = RangeState {
                                    total: false,
                                    lower: attr(&el, "lower")
                                        .and_then(|v| v.parse().ok())
                                        .unwrap_or(0.0),
                                    upper: attr(&el, "upper")
                                        .and_then(|v| v.parse().ok())
                                        .unwrap_or(0.0),
                                };
                            }
                        }
                    }
                    b"Grid" if in_tools => {
                        in_grid = true;
                        if let Some(tools) = tools.as_mut() {
                            let fixed_colour =
                                attr(&el, "fixedColour").as_deref() == Some("true");
                            let vertical = attr(&el, "vertical").as_deref() == Some("true");
                            let horizontal = attr(&el, "horizontal").as_deref() == Some("true");
                            tools.grid = GridState {
                                colour: fixed_colour.then_some(css::BLACK),
                                vertical,
                                vertical_lines: attr(&el, "vertlines")
                                    .and_then(|v| v.parse().ok())
                                    .unwrap_or(0),
                                horizontal,
                                horizontal_lines: attr(&el, "horlines")
                                    .and_then(|v| v.parse().ok())
                                    .unwrap_or(0),
                                style: attr(&el, "style")
                                    .map(|v| style_from_tag(&v))
                                    .unwrap_or(LineStyle::Solid),
                            };
                        }
                    }
                    b"GridColour" if in_grid => {
                        if let Some(tools) = tools.as_mut()
                            && tools.grid.colour.is_some()
                        {
                            tools.grid.colour = Some(colour_from_attrs(&el));
                        }
                    }
                    _ => {}
                }
            }
            Event::End(el) => match el.name().as_ref() {
                b"Header" | b"YLabel" | b"XLabel" => {
                    let built = std::mem::take(&mut label).build();
                    match label_slot.take() {
                        Some(LabelSlot::Header) => header = Some(built),
                        Some(LabelSlot::YLabel) => y_label = Some(built),
                        Some(LabelSlot::XLabel) => x_label = Some(built),
                        None => {}
                    }
                }
                b"ToolsWidget" => in_tools = false,
                b"Chart" => in_chart = false,
                b"Grid" => in_grid = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(StateError::MissingRoot);
    }
    let chart_type = chart_type.ok_or(StateError::UnknownChartType(chart_type_tag))?;

    Ok(ChartState {
        view: ViewState {
            header,
            y_label,
            x_label,
            chart_type,
        },
        data,
        tools,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> LabelState {
        LabelState {
            font: "sans-serif,14,700,italic,false".to_owned(),
            colour: Color::from_rgb8(10, 20, 30),
            max_font_size: 14.0,
            text: text.to_owned(),
            alignment: HAlign::Left,
        }
    }

    fn full_state() -> ChartState {
        ChartState {
            view: ViewState {
                header: Some(label("My Chart")),
                y_label: Some(label("units")),
                x_label: Some(label("categories")),
                chart_type: ChartKind::Pie,
            },
            data: Some(vec![
                DataItem {
                    category: "A".to_owned(),
                    value: "10".to_owned(),
                },
                DataItem {
                    category: "B & C".to_owned(),
                    value: "2.5".to_owned(),
                },
            ]),
            tools: Some(ToolsState {
                chart_colour: Some(Color::from_rgb8(200, 100, 50)),
                range: RangeState {
                    total: false,
                    lower: 1.5,
                    upper: 20.0,
                },
                grid: GridState {
                    colour: Some(Color::from_rgb8(1, 2, 3)),
                    vertical: true,
                    vertical_lines: 4,
                    horizontal: false,
                    horizontal_lines: 0,
                    style: LineStyle::Dash,
                },
            }),
        }
    }

    #[test]
    fn full_document_round_trips() {
        let state = full_state();
        let xml = write(&state);
        let restored = parse(&xml).expect("round trip parses");
        assert_eq!(restored, state);
    }

    #[test]
    fn data_section_is_omitted_when_absent() {
        let mut state = full_state();
        state.data = None;
        let xml = write(&state);
        assert!(!xml.contains("<Data>"));
        assert_eq!(parse(&xml).unwrap().data, None);
    }

    #[test]
    fn disabled_horizontal_lines_serialize_as_false() {
        let state = full_state();
        let xml = write(&state);
        assert!(xml.contains(r#"horizontal="false""#));
    }

    #[test]
    fn unknown_alignment_defaults_to_centre() {
        let xml = r#"<GobChart><View><Header><LabelDetails>
            <Alignment value="justified"/>
            </LabelDetails></Header><ChartType value="0"/></View></GobChart>"#;
        let state = parse(xml).expect("parses");
        assert_eq!(state.view.header.unwrap().alignment, HAlign::Centre);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let xml = r#"<GobChart><View><Header><LabelDetails>
            <FontColour red="nope" green="300" blue="12"/>
            <MaxFontSize value="huge"/>
            </LabelDetails></Header><ChartType value="2"/></View></GobChart>"#;
        let state = parse(xml).expect("parses");
        let header = state.view.header.unwrap();
        assert_eq!(header.colour, Color::from_rgb8(0, 0, 12));
        assert_eq!(header.max_font_size, 11.0);
        assert_eq!(state.view.chart_type, ChartKind::Line);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(matches!(
            parse("<View><ChartType value=\"0\"/></View>"),
            Err(StateError::MissingRoot)
        ));
    }

    #[test]
    fn unknown_chart_type_is_an_error() {
        let xml = r#"<GobChart><View><ChartType value="7"/></View></GobChart>"#;
        assert!(matches!(
            parse(xml),
            Err(StateError::UnknownChartType(7))
        ));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let state = full_state();
        let xml = write(&state);
        assert!(xml.contains("B &amp; C"));
        let restored = parse(&xml).unwrap();
        assert_eq!(restored.data.unwrap()[1].category, "B & C");
    }
}
