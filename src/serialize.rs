use rulinalg::matrix::{BaseMatrix, Matrix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize_matrices<S: Serializer>(
    matrices: &[Matrix<f64>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    // Convert f64 values to u64 bits for precise serialization, one outer
    // vec per matrix, one inner vec per row
    let bits: Vec<Vec<Vec<u64>>> = matrices
        .iter()
        .map(|m| {
            m.data()
                .chunks(m.cols())
                .map(|row| row.iter().map(|&f| f64::to_bits(f)).collect())
                .collect()
        })
        .collect();

    bits.serialize(serializer)
}

pub fn deserialize_matrices<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Matrix<f64>>, D::Error> {
    Vec::<Vec<Vec<u64>>>::deserialize(deserializer).map(|matrices| {
        matrices
            .into_iter()
            .map(|rows| {
                let n_rows = rows.len();
                let n_cols = rows.first().map_or(0, Vec::len);
                // Convert u64 bits back to f64 values
                let float_data: Vec<f64> =
                    rows.into_iter().flatten().map(f64::from_bits).collect();

                debug_assert_eq!(n_rows * n_cols, float_data.len(), "ragged weight rows");
                Matrix::new(n_rows, n_cols, float_data)
            })
            .collect()
    })
}
