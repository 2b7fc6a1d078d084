//! SVG and JSON serialization of a finished drawing.

use crate::drawing::{GenerationState, Segment};
use crate::error::Result;
use crate::params::DrawingParameters;
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

/// Options for [`to_svg`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgOptions {
    /// Label each segment with its length and heading.
    pub annotations: bool,
}

/// Renders the drawing as a standalone SVG document.
///
/// One `<line>` per segment in drawing order on a white background, with a
/// red marker at the start point.
pub fn to_svg(state: &GenerationState, params: &DrawingParameters, options: SvgOptions) -> String {
    let mut svg = format!(
        r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
        params.canvas_width, params.canvas_height
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);

    for segment in &state.segments {
        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
            segment.start.x,
            segment.start.y,
            segment.end.x,
            segment.end.y,
            escape(&segment.color)
        ));
        if options.annotations {
            push_annotations(&mut svg, segment);
        }
    }

    svg.push_str(&format!(
        r#"<circle cx="{}" cy="{}" r="4" fill="red"/>"#,
        params.start_point.x, params.start_point.y
    ));
    svg.push_str("</svg>");
    svg
}

fn push_annotations(svg: &mut String, segment: &Segment) {
    let mid_x = (segment.start.x + segment.end.x) / 2.0;
    let mid_y = (segment.start.y + segment.end.y) / 2.0;
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" fill="black" font-size="10" font-family="Arial">L:{:.1}</text>"#,
        mid_x + 5.0,
        mid_y - 5.0,
        segment.length
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" fill="black" font-size="10" font-family="Arial">A:{:.1}°</text>"#,
        mid_x + 5.0,
        mid_y + 10.0,
        segment.angle
    ));
}

/// Summary block written alongside the segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_segments: usize,
    pub total_length: f64,
    pub exported_at: DateTime<Utc>,
}

/// The JSON export document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub parameters: DrawingParameters,
    pub segments: Vec<Segment>,
    pub metadata: ExportMetadata,
}

impl ExportDocument {
    pub fn new(state: &GenerationState, params: &DrawingParameters) -> Self {
        Self::at(state, params, Utc::now())
    }

    /// Like [`new`](Self::new) with an explicit export timestamp.
    pub fn at(
        state: &GenerationState,
        params: &DrawingParameters,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            parameters: params.clone(),
            segments: state.segments.clone(),
            metadata: ExportMetadata {
                total_segments: state.segments.len(),
                total_length: state.total_length(),
                exported_at,
            },
        }
    }
}

/// Serializes the drawing as pretty-printed JSON.
///
/// The parameters are validated first: JSON has no encoding for non-finite
/// numbers, so such a record could not be read back by [`from_json`].
pub fn to_json(state: &GenerationState, params: &DrawingParameters) -> Result<String> {
    params.validate()?;
    Ok(serde_json::to_string_pretty(&ExportDocument::new(state, params))?)
}

/// Decodes a document produced by [`to_json`].
pub fn from_json(json: &str) -> Result<ExportDocument> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::Point;
    use crate::error::BendError;

    fn two_segment_state() -> GenerationState {
        let mut state = GenerationState::new(Point::new(0.0, 0.0));
        state.push_segment(Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
            length: 10.0,
            angle: 0.0,
            color: "#FF0000".into(),
        });
        state.push_segment(Segment {
            start: Point::new(10.0, 0.0),
            end: Point::new(10.0, 20.0),
            length: 20.0,
            angle: 90.0,
            color: "#00FF00".into(),
        });
        state
    }

    #[test]
    fn svg_has_one_line_per_segment() {
        let params = DrawingParameters {
            start_point: Point::new(0.0, 0.0),
            ..Default::default()
        };
        let svg = to_svg(&two_segment_state(), &params, SvgOptions::default());

        assert!(svg.starts_with(r#"<svg width="800" height="600""#));
        assert!(svg.contains(r#"<rect width="100%" height="100%" fill="white"/>"#));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert!(svg.contains(r##"<line x1="10" y1="0" x2="10" y2="20" stroke="#00FF00" stroke-width="2"/>"##));
        assert_eq!(svg.matches("<circle ").count(), 1);
        assert!(svg.contains(r#"<circle cx="0" cy="0" r="4" fill="red"/>"#));
        assert!(!svg.contains("<text"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn svg_annotations_label_each_segment() {
        let params = DrawingParameters::default();
        let svg = to_svg(
            &two_segment_state(),
            &params,
            SvgOptions { annotations: true },
        );
        assert_eq!(svg.matches("<text ").count(), 4);
        assert!(svg.contains(">L:20.0</text>"));
        assert!(svg.contains(">A:90.0°</text>"));
    }

    #[test]
    fn svg_escapes_colors() {
        let mut state = two_segment_state();
        state.segments[0].color = r#"x"><script>"#.into();
        let svg = to_svg(&state, &DrawingParameters::default(), SvgOptions::default());
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("x&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn json_round_trips() {
        let state = two_segment_state();
        let params = DrawingParameters::default();
        let json = to_json(&state, &params).unwrap();

        let doc = from_json(&json).unwrap();
        assert_eq!(doc.parameters, params);
        assert_eq!(doc.segments, state.segments);
        assert_eq!(doc.metadata.total_segments, 2);
        assert_eq!(doc.metadata.total_length, 30.0);
    }

    #[test]
    fn json_rejects_non_finite_parameters() {
        let params = DrawingParameters {
            fixed_angle: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            to_json(&two_segment_state(), &params),
            Err(BendError::InvalidParameters(msg)) if msg.contains("fixedAngle")
        ));
    }

    #[test]
    fn json_uses_export_field_names() {
        let json = to_json(&two_segment_state(), &DrawingParameters::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["totalSegments"], 2);
        assert!(value["metadata"]["exportedAt"].is_string());
        assert_eq!(value["parameters"]["stoppingCondition"], "count");
        assert_eq!(value["segments"][1]["angle"], 90.0);
    }
}
