//! CLI Exit Code Registry
//!
//! This is the single source of truth for `jsb` exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error; `jsb exists` on a missing document    |
//! | 2    | Usage error (missing project/name, bad arguments)    |
//! | 10   | Missing API key for the requested operation          |
//! | 11   | Invalid content or unreadable input file             |
//! | 12   | Service rejected the request with a structured code  |
//! | 13   | Network failure or unclassified service error        |
//! | 14   | Service response could not be decoded                |

use jsonbank_client::{codes, RequestError, Tier};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Public or private key not configured.
pub const EXIT_MISSING_KEY: u8 = 10;

/// Content is not JSON, or the upload file is missing/unreadable.
pub const EXIT_INVALID_INPUT: u8 = 11;

/// Service returned `{code, message}` (e.g. `notFound`, `name.exists`).
pub const EXIT_SERVICE: u8 = 12;

/// Transport failure, or a non-200 response without a structured code.
pub const EXIT_NETWORK: u8 = 13;

/// Response body was not the JSON we expected.
pub const EXIT_DECODE: u8 = 14;

/// Map a client error to its exit code.
pub fn request_exit_code(err: &RequestError) -> u8 {
    if err.missing_tier().is_some() {
        return EXIT_MISSING_KEY;
    }
    match err.code.as_str() {
        codes::BAD_REQUEST => EXIT_USAGE,
        codes::INVALID_JSON_CONTENT | codes::FILE_NOT_FOUND | codes::INVALID_FILE => EXIT_INVALID_INPUT,
        codes::REQUEST_ERROR => EXIT_NETWORK,
        codes::JSON_ERROR => EXIT_DECODE,
        _ => EXIT_SERVICE,
    }
}
