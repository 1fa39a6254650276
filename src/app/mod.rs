// SPDX-License-Identifier: MPL-2.0
//! Process-level setup shared by the binary: directories and logging.

pub mod logging;
pub mod paths;
