//! The `Transport` and `Store` collaborators, kept as thin
//! injectable trait objects rather than a concrete websocket type baked
//! into the session logic.

use async_trait::async_trait;

use nero_mpc_types::messages::dkg::{
    DkgCommitRequest, DkgCommitResponse, DkgInitRequest, DkgInitResponse, DkgShareRequest,
    DkgShareResponse,
};
use nero_mpc_types::messages::dkls::{
    DklsKeygenCommitmentRequest, DklsKeygenCommitmentResponse, DklsKeygenCompleteRequest,
    DklsKeygenCompleteResponse, DklsKeygenInitRequest, DklsKeygenInitResponse,
    DklsSigningInitRequest, DklsSigningInitResponse, DklsSigningMtaRound1Request,
    DklsSigningMtaRound1Response, DklsSigningMtaRound2Request, DklsSigningMtaRound2Response,
    DklsSigningNonceRequest, DklsSigningNonceResponse, DklsSigningPartialRequest,
    DklsSigningPartialResponse,
};
use nero_mpc_types::messages::signing::{
    SignCompleteRequest, SignCompleteResponse, SignInitRequest, SignInitResponse,
    SignNonceRequest, SignNonceResponse,
};

/// A request/response abstraction over which a session exchanges framed
/// messages with the backend counterparty, keyed by logical operation
/// name rather than URL. One method per named operation; the
/// cryptographic core never sees an untyped envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `dkg.init`.
    async fn dkg_init(&self, req: DkgInitRequest) -> Result<DkgInitResponse, String>;
    /// `dkg.commit`.
    async fn dkg_commit(&self, req: DkgCommitRequest) -> Result<DkgCommitResponse, String>;
    /// `dkg.share`.
    async fn dkg_share(&self, req: DkgShareRequest) -> Result<DkgShareResponse, String>;

    /// `sign.init`.
    async fn sign_init(&self, req: SignInitRequest) -> Result<SignInitResponse, String>;
    /// `sign.nonce`.
    async fn sign_nonce(&self, req: SignNonceRequest) -> Result<SignNonceResponse, String>;
    /// `sign.complete`.
    async fn sign_complete(&self, req: SignCompleteRequest) -> Result<SignCompleteResponse, String>;

    /// `dkls.keygen.init`.
    async fn dkls_keygen_init(
        &self,
        req: DklsKeygenInitRequest,
    ) -> Result<DklsKeygenInitResponse, String>;
    /// `dkls.keygen.commitment`.
    async fn dkls_keygen_commitment(
        &self,
        req: DklsKeygenCommitmentRequest,
    ) -> Result<DklsKeygenCommitmentResponse, String>;
    /// `dkls.keygen.complete`.
    async fn dkls_keygen_complete(
        &self,
        req: DklsKeygenCompleteRequest,
    ) -> Result<DklsKeygenCompleteResponse, String>;

    /// `dkls.signing.init`.
    async fn dkls_signing_init(
        &self,
        req: DklsSigningInitRequest,
    ) -> Result<DklsSigningInitResponse, String>;
    /// `dkls.signing.nonce`.
    async fn dkls_signing_nonce(
        &self,
        req: DklsSigningNonceRequest,
    ) -> Result<DklsSigningNonceResponse, String>;
    /// `dkls.signing.mta.round1`.
    async fn dkls_signing_mta_round1(
        &self,
        req: DklsSigningMtaRound1Request,
    ) -> Result<DklsSigningMtaRound1Response, String>;
    /// `dkls.signing.mta.round2`.
    async fn dkls_signing_mta_round2(
        &self,
        req: DklsSigningMtaRound2Request,
    ) -> Result<DklsSigningMtaRound2Response, String>;
    /// `dkls.signing.partial`.
    async fn dkls_signing_partial(
        &self,
        req: DklsSigningPartialRequest,
    ) -> Result<DklsSigningPartialResponse, String>;
}

/// Blob persistence for the encrypted `KeyShare`. The engine
/// writes only one kind of record per user: an encrypted envelope
/// wrapping the JSON key share.
#[async_trait]
pub trait Store: Send + Sync {
    /// Reads the value for `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String>;
    /// Writes `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), String>;
    /// Removes `key`, if present.
    async fn delete(&self, key: &str) -> Result<(), String>;
    /// Removes every key this engine has written.
    async fn clear(&self) -> Result<(), String>;
}
