//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod analysis_bindings;
mod talkbox_bindings;

/// Python module definition
#[pymodule]
fn talkbox(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<talkbox_bindings::PyTalkBox>()?;

    m.add_function(wrap_pyfunction!(analysis_bindings::autocorrelation, m)?)?;
    m.add_function(wrap_pyfunction!(analysis_bindings::levinson_durbin, m)?)?;

    Ok(())
}
