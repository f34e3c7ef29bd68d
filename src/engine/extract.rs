// src/engine/extract.rs
use crate::engine::observe::observe_row;
use crate::engine::types::{CancelToken, LoadMode, RowFragment, SdParams};
use crate::error::{AipError, Result};
use crate::store::{DataSet, RowRef};

/// Write every marker of `row` into the store and return the distinct
/// entities it touched, in first-seen order.
///
/// In `LoadMode::Related` every entity of the row is observed as related
/// to every other one.
pub fn load_row<R: RowFragment + ?Sized>(ds: &mut DataSet, row: &R, mode: LoadMode) -> Result<Vec<RowRef>> {
    if ds.is_finalized() {
        return Err(AipError::Finalized);
    }

    let mut touched: Vec<RowRef> = Vec::new();
    for marker in row.markers() {
        let params = marker
            .params
            .as_deref()
            .ok_or_else(|| AipError::MissingParams { value: marker.value.clone() })?;
        let sd = SdParams::parse(params)?;

        let entity = ds.get_or_create_row(&sd.table, sd.row_id);
        ds.set_attribute(&entity, &sd.column, marker.value);
        if !touched.contains(&entity) {
            touched.push(entity);
        }
    }

    if mode == LoadMode::Related {
        observe_row(ds.pending_mut(), &touched);
    }
    Ok(touched)
}

/// Load rows one after the other with default co-occurrence. Returns the
/// number of entity references across all rows.
pub fn load_rows<'a, R, I>(ds: &mut DataSet, rows: I, cancel: &CancelToken) -> Result<usize>
where
    R: RowFragment + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut count = 0usize;
    for row in rows {
        cancel.check()?;
        count += load_row(ds, row, LoadMode::Related)?.len();
    }
    Ok(count)
}
