//! Error body DTO

use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response from the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
