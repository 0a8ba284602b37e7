// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub use crate::debounce_value::DebounceValueExt;
pub use crate::debouncer::Debouncer;
pub use crate::machine::Outcome;
pub use crate::options::DebounceOptions;
