use ndarray::Array2;
use serde::{ser::SerializeSeq, Serializer};

/// Writes a 2-D grid as a list of rows, missing cells as null
pub fn serialize_grid<S>(grid: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(grid.nrows()))?;
    for row in grid.rows() {
        let row = row
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect::<Vec<_>>();
        seq.serialize_element(&row)?;
    }
    seq.end()
}

/// Writes a series with NaN entries as null
pub fn serialize_series<S>(series: &[f64], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(series.iter().map(|v| if v.is_nan() { None } else { Some(*v) }))
}
