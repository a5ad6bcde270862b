//! Serialize committed shapes to the compact JSON shape-array format.

use crate::model::ShapeResult;

/// Encode the shape results as a JSON array of integer arrays, each one
/// being `[kind_tag, r, g, b, a, ...shape_params]`.
pub fn export(results: &[ShapeResult]) -> serde_json::Result<String> {
    let rows: Vec<Vec<i64>> = results
        .iter()
        .map(|result| {
            let mut row = vec![
                i64::from(result.shape.kind().tag()),
                i64::from(result.color.r),
                i64::from(result.color.g),
                i64::from(result.color.b),
                i64::from(result.color.a),
            ];
            row.extend(result.shape.params().into_iter().map(i64::from));

            row
        })
        .collect();

    serde_json::to_string(&rows)
}
