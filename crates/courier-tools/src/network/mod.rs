//! Network tools: request assembly, execution and the host-facing REST tools.

pub mod executor;
pub mod request;
pub mod response;
pub mod tools;

pub use executor::{ExecutorConfig, ExecutorError, RequestExecutor};
pub use request::{
    AuthDescriptor, HeaderFields, HttpMethod, PreparedRequest, RequestBody, RequestSpec,
    UnsupportedMethod, prepare,
};
pub use response::{
    ErrorDetails, ErrorResult, RequestOutcome, ResponseData, ResponseResult, TransportDiagnostic,
    TransportErrorKind, is_success,
};
pub use tools::{
    AuthType, GET_REQUEST, GetRequestParams, GetRequestTool, POST_REQUEST, PostRequestParams,
    PostRequestTool, REST_REQUEST, RestRequestParams, RestRequestTool, standard_tools,
};
