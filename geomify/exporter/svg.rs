//! Serialize committed shapes to an SVG document.

use crate::model::ShapeResult;
use crate::shape::Shape;

/// Render the given shape results, in commit order, as a standalone SVG
/// document of the given canvas size.
pub fn export(results: &[ShapeResult], width: u32, height: u32) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    ));
    out.push('\n');

    for result in results {
        out.push_str(&element(result));
        out.push('\n');
    }

    out.push_str("</svg>\n");

    out
}

fn element(result: &ShapeResult) -> String {
    let color = format!(
        "rgb({},{},{})",
        result.color.r, result.color.g, result.color.b
    );
    let opacity = f64::from(result.color.a) / 255.0;

    // filled shapes carry fill attributes, the stroked ones get a bare
    // one pixel stroke instead
    let fill = format!(r#"fill="{}" fill-opacity="{:.4}""#, color, opacity);
    let stroke = format!(
        r#"fill="none" stroke="{}" stroke-opacity="{:.4}" stroke-width="1""#,
        color, opacity
    );

    match &result.shape {
        Shape::Rectangle(s) => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            s.x1,
            s.y1,
            s.x2 - s.x1,
            s.y2 - s.y1,
            fill
        ),
        Shape::RotatedRectangle(s) => {
            format!(r#"<polygon points="{}" {}/>"#, points_attr(&s.corners()), fill)
        }
        Shape::Triangle(s) => {
            format!(r#"<polygon points="{}" {}/>"#, points_attr(&s.points), fill)
        }
        Shape::Ellipse(s) => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {}/>"#,
            s.x, s.y, s.rx, s.ry, fill
        ),
        Shape::RotatedEllipse(s) => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" transform="rotate({} {} {})" {}/>"#,
            s.x,
            s.y,
            s.rx,
            s.ry,
            s.angle.to_degrees().round() as i32,
            s.x,
            s.y,
            fill
        ),
        Shape::Circle(s) => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            s.x, s.y, s.r, fill
        ),
        Shape::Line(s) => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            s.p1.x, s.p1.y, s.p2.x, s.p2.y, stroke
        ),
        Shape::QuadraticBezier(s) => format!(
            r#"<path d="M {} {} Q {} {} {} {}" {}/>"#,
            s.p1.x, s.p1.y, s.control.x, s.control.y, s.p2.x, s.p2.y, stroke
        ),
        Shape::Polyline(s) => {
            format!(r#"<polyline points="{}" {}/>"#, points_attr(&s.points), stroke)
        }
    }
}

fn points_attr(points: &[geo::PointI32]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use geo::PointI32;

    use crate::bitmap::Rgba;
    use crate::shape::{Rect, Triangle};

    #[test]
    fn test_export_rect_and_triangle() {
        let results = vec![
            ShapeResult {
                score: 0.5,
                color: Rgba::new(255, 0, 0, 128),
                shape: Shape::Rectangle(Rect {
                    x1: 1,
                    y1: 2,
                    x2: 5,
                    y2: 9,
                }),
            },
            ShapeResult {
                score: 0.4,
                color: Rgba::new(0, 255, 0, 255),
                shape: Shape::Triangle(Triangle {
                    points: [
                        PointI32::new(0, 0),
                        PointI32::new(4, 0),
                        PointI32::new(2, 3),
                    ],
                }),
            },
        ];

        let svg = export(&results, 10, 10);

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="10" height="10""#));
        assert!(svg.contains(
            r#"<rect x="1" y="2" width="4" height="7" fill="rgb(255,0,0)" fill-opacity="0.5020"/>"#
        ));
        assert!(svg.contains(r#"<polygon points="0,0 4,0 2,3" fill="rgb(0,255,0)" fill-opacity="1.0000"/>"#));
    }

    #[test]
    fn test_stroked_shapes_have_no_fill() {
        use crate::shape::Line;

        let results = vec![ShapeResult {
            score: 0.1,
            color: Rgba::new(1, 2, 3, 51),
            shape: Shape::Line(Line {
                p1: PointI32::new(0, 0),
                p2: PointI32::new(9, 9),
            }),
        }];

        let svg = export(&results, 10, 10);

        assert!(svg.contains(
            r#"<line x1="0" y1="0" x2="9" y2="9" fill="none" stroke="rgb(1,2,3)" stroke-opacity="0.2000" stroke-width="1"/>"#
        ));
    }
}
