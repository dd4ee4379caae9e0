//! # Authentication Integration Flows
//!
//! End-to-end handshake scenarios through the real authenticator and the
//! runtime's credential store adapter: chain scanning, the accept
//! short-circuit, fingerprint collisions, and fail-closed rejection.

#[cfg(test)]
mod tests {
    use hub_device_auth::{
        certificate_fingerprint, AuthenticationOutcome, DerCertificate, DeviceAuthenticator,
        DeviceAuthenticatorApi, PresentedChain, RejectReason,
    };
    use hub_runtime::adapters::InMemoryCredentialStore;
    use shared_types::{DeviceCredentials, DeviceId};

    fn authenticator_with(
        provisioned: &[(&[u8], DeviceId)],
    ) -> (
        DeviceAuthenticator<InMemoryCredentialStore>,
        InMemoryCredentialStore,
    ) {
        let store = InMemoryCredentialStore::new();
        for (der, device_id) in provisioned {
            store.provision(&DerCertificate::new(der.to_vec()), *device_id);
        }
        (DeviceAuthenticator::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_provisioned_leaf_accepted() {
        let device = DeviceId::new();
        let (auth, _) = authenticator_with(&[(b"leaf-cert", device)]);
        let chain = PresentedChain::new(vec![DerCertificate::new(b"leaf-cert".to_vec())]);

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Accepted(device)
        );
    }

    #[tokio::test]
    async fn test_provisioned_intermediate_accepted() {
        // Only the intermediate is provisioned; the scan walks past the
        // unknown leaf and accepts on the second entry.
        let device = DeviceId::new();
        let (auth, _) = authenticator_with(&[(b"intermediate-ca", device)]);
        let chain = PresentedChain::new(vec![
            DerCertificate::new(b"unknown-leaf".to_vec()),
            DerCertificate::new(b"intermediate-ca".to_vec()),
        ]);

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Accepted(device)
        );
    }

    #[tokio::test]
    async fn test_unprovisioned_chain_rejected() {
        let (auth, _) = authenticator_with(&[(b"someone-else", DeviceId::new())]);
        let chain = PresentedChain::new(vec![
            DerCertificate::new(b"stranger-leaf".to_vec()),
            DerCertificate::new(b"stranger-ca".to_vec()),
        ]);

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
        );
    }

    #[tokio::test]
    async fn test_colliding_fingerprint_not_accepted() {
        // A record whose fingerprint matches the presented certificate but
        // whose stored value belongs to different certificate bytes must
        // not authenticate: the exact-match comparison catches it.
        let presented = DerCertificate::new(b"victim-cert".to_vec());
        let other = DerCertificate::new(b"attacker-cert".to_vec());

        let store = InMemoryCredentialStore::new();
        // A record keyed by the victim's fingerprint but holding the other
        // certificate's value, simulating a hash collision.
        store.insert_record(DeviceCredentials {
            credentials_id: presented.fingerprint(),
            credentials_value: other.canonical(),
            device_id: DeviceId::new(),
        });

        let auth = DeviceAuthenticator::new(store);
        let chain = PresentedChain::new(vec![presented]);

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
        );
    }

    #[tokio::test]
    async fn test_unknown_leaf_with_colliding_intermediate_rejected() {
        // Two-certificate chain: the leaf is absent from the store, and
        // the intermediate's fingerprint resolves to a record holding a
        // different certificate's value. Neither entry may authenticate,
        // so the whole handshake fails closed.
        let leaf = DerCertificate::new(b"unprovisioned-leaf".to_vec());
        let intermediate = DerCertificate::new(b"colliding-intermediate".to_vec());
        let other = DerCertificate::new(b"some-other-cert".to_vec());

        let store = InMemoryCredentialStore::new();
        store.insert_record(DeviceCredentials {
            credentials_id: intermediate.fingerprint(),
            credentials_value: other.canonical(),
            device_id: DeviceId::new(),
        });

        let auth = DeviceAuthenticator::new(store);
        let chain = PresentedChain::new(vec![leaf, intermediate]);

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
        );
    }

    #[tokio::test]
    async fn test_empty_chain_rejected() {
        let (auth, _) = authenticator_with(&[(b"provisioned", DeviceId::new())]);

        assert_eq!(
            auth.authenticate(&PresentedChain::new(Vec::new())).await,
            AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
        );
    }

    #[tokio::test]
    async fn test_revocation_takes_effect() {
        let device = DeviceId::new();
        let (auth, store) = authenticator_with(&[(b"revocable", device)]);
        let cert = DerCertificate::new(b"revocable".to_vec());
        let chain = PresentedChain::new(vec![cert.clone()]);

        assert!(auth.authenticate(&chain).await.is_accepted());

        store.revoke(&cert.fingerprint());

        assert_eq!(
            auth.authenticate(&chain).await,
            AuthenticationOutcome::Rejected(RejectReason::CredentialNotFound)
        );
    }

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        let a = certificate_fingerprint(b"cert-a");
        let b = certificate_fingerprint(b"cert-b");

        assert_eq!(a, certificate_fingerprint(b"cert-a"));
        assert_ne!(a, b);
        // SHA3-256 hex digest
        assert_eq!(a.len(), 64);
    }
}
