pub mod get_filtering_status;

pub use get_filtering_status::GetFilteringStatusUseCase;
