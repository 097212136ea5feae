use axum::http::StatusCode;
use rstest::rstest;
use tutorcal_api::middleware::error_handling::{AppError, map_error};
use tutorcal_core::errors::SlotError;

#[rstest]
#[case(SlotError::NotFound("Slot not found".to_string()), StatusCode::NOT_FOUND)]
#[case(SlotError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(SlotError::Transport("unreachable".to_string()), StatusCode::BAD_GATEWAY)]
#[case(SlotError::Malformed("not an array".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(SlotError::Storage(eyre::eyre!("disk full")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    SlotError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_internal_server_error() {
    let error: AppError = eyre::eyre!("write failed").into();

    assert!(matches!(error.0, SlotError::Storage(_)));
}
