pub(crate) mod aspect;
pub(crate) mod border;
pub(crate) mod color;
pub(crate) mod resample;
