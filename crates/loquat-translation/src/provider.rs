//! Provider abstraction
//!
//! A provider executes every non-invalidated operation of a request against
//! a remote backend. Execution is a blocking round-trip on the calling
//! thread; callers needing timeouts or retries must wrap the call.

use crate::error::TranslationResult;
use crate::operation::{OperationKind, OperationStatus, TranslationOperation};
use crate::request::TranslationRequest;

/// A remote translation backend
pub trait TranslationProvider {
    /// Execute the request in place. Per-operation outcomes land on the
    /// operation records (status, results, reason); only transport-level
    /// breakage is reported through the returned error.
    fn execute(&self, request: &mut TranslationRequest) -> TranslationResult<()>;
}

/// Pre-pass shared by providers: skip translate operations whose result is
/// already known, unless the request is forced.
pub fn invalidate_known_results(request: &mut TranslationRequest) {
    if request.is_forced() {
        return;
    }
    for operation in request.operations_mut() {
        if operation.kind() == OperationKind::Translate
            && operation.status() == OperationStatus::Created
            && operation.translated_text().is_some()
        {
            operation.invalidate("translated text is already known");
        }
    }
}

/// Execute a one-shot request through the given provider and hand back the
/// single operation record.
pub fn execute_single(
    provider: &dyn TranslationProvider,
    name: &str,
    operation: TranslationOperation,
) -> TranslationResult<TranslationOperation> {
    let mut request = TranslationRequest::new(name).with_operation(operation);
    provider.execute(&mut request)?;
    request
        .into_single_operation()
        .ok_or(crate::error::TranslationError::MissingResult {
            operation: name.to_string(),
        })
}
