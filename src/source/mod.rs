pub(crate) mod fetch;
pub(crate) mod title;
pub(crate) mod video_id;
