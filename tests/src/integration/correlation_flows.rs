//! # Correlation Integration Flows
//!
//! Exercises the request/response lifecycle through the full stack: a
//! server-to-device RPC registered in the correlation store, the device's
//! response arriving over a transport decode path, expiry racing delivery,
//! and session close sweeping pending requests.

#[cfg(test)]
mod tests {
    use hub_msg_routing::correlation::{cleanup_task, CorrelationOutcome, PendingRpcStore};
    use hub_msg_routing::dispatch::Disposition;
    use hub_runtime::adapters::InMemoryCredentialStore;
    use hub_runtime::{GatewayContainer, HubConfig, SessionHandler};
    use hub_device_auth::{DerCertificate, DeviceAuthenticator, PresentedChain};
    use hub_transport::mqtt::{self, Direction, MqttFrame};
    use shared_types::{CorrelationId, DeviceId, SessionId};
    use std::sync::Arc;
    use std::time::Duration;

    type HubSessionHandler = SessionHandler<DeviceAuthenticator<InMemoryCredentialStore>>;

    fn build_handler() -> (HubSessionHandler, PresentedChain, hub_runtime::HubChannels) {
        let (container, channels) = GatewayContainer::new(HubConfig::default());
        let cert = DerCertificate::new(b"rpc-device".to_vec());
        container.credentials.provision(&cert, DeviceId::new());

        let handler = SessionHandler::new(
            Arc::clone(&container.authenticator),
            Arc::clone(&container.dispatcher),
        );
        (handler, PresentedChain::new(vec![cert]), channels)
    }

    #[tokio::test]
    async fn test_rpc_answered_over_mqtt() {
        let (handler, chain, _channels) = build_handler();
        let session = handler.open(&chain).await.unwrap();

        // Server registers the outgoing RPC, then pushes it to the device.
        let id = CorrelationId::new();
        let rx = handler
            .dispatcher()
            .correlations()
            .register(session.session_id, id, None)
            .unwrap();

        // Device answers on the response topic.
        let disposition = handler
            .handle_mqtt(
                &session,
                Direction::FromDevice,
                MqttFrame::Publish {
                    topic: format!("{}{id}", mqtt::RPC_RESPONSE_PREFIX),
                    payload: b"{\"result\":42}".to_vec(),
                },
            )
            .await
            .unwrap();

        assert_eq!(disposition, Disposition::Answered);
        assert_eq!(
            rx.await.unwrap(),
            CorrelationOutcome::Answered {
                payload: b"{\"result\":42}".to_vec()
            }
        );
    }

    #[tokio::test]
    async fn test_late_response_is_orphaned() {
        let (handler, chain, _channels) = build_handler();
        let session = handler.open(&chain).await.unwrap();

        let id = CorrelationId::new();
        let rx = handler
            .dispatcher()
            .correlations()
            .register(session.session_id, id, Some(Duration::from_millis(0)))
            .unwrap();

        // The sweeper claims the entry before the response lands.
        assert_eq!(handler.dispatcher().correlations().remove_expired(), 1);
        assert_eq!(rx.await.unwrap(), CorrelationOutcome::Expired);

        let disposition = handler
            .handle_mqtt(
                &session,
                Direction::FromDevice,
                MqttFrame::Publish {
                    topic: format!("{}{id}", mqtt::RPC_RESPONSE_PREFIX),
                    payload: b"late".to_vec(),
                },
            )
            .await
            .unwrap();

        assert_eq!(disposition, Disposition::OrphanDiscarded);
    }

    #[tokio::test]
    async fn test_disconnect_sweeps_pending_rpcs() {
        let (handler, chain, _channels) = build_handler();
        let session = handler.open(&chain).await.unwrap();

        let rx_a = handler
            .dispatcher()
            .correlations()
            .register(session.session_id, CorrelationId::new(), None)
            .unwrap();
        let rx_b = handler
            .dispatcher()
            .correlations()
            .register(session.session_id, CorrelationId::new(), None)
            .unwrap();

        // Pending requests on another session survive the close.
        let other_session = SessionId::new();
        let _rx_other = handler
            .dispatcher()
            .correlations()
            .register(other_session, CorrelationId::new(), None)
            .unwrap();

        let disposition = handler
            .handle_mqtt(&session, Direction::FromDevice, MqttFrame::Disconnect)
            .await
            .unwrap();

        assert_eq!(disposition, Disposition::SessionClosed(2));
        assert_eq!(rx_a.await.unwrap(), CorrelationOutcome::Expired);
        assert_eq!(rx_b.await.unwrap(), CorrelationOutcome::Expired);
        assert_eq!(handler.dispatcher().correlations().pending_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_response_and_expiry_resolve_exactly_once() {
        let store = Arc::new(PendingRpcStore::new(Duration::from_millis(0)));
        let session = SessionId::new();

        for _ in 0..100 {
            let id = CorrelationId::new();
            let rx = store.register(session, id, None).unwrap();

            let completer = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.complete(id, b"won".to_vec()) })
            };
            let expirer = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.remove_expired() })
            };

            let answered = completer.await.unwrap();
            let expired = expirer.await.unwrap();

            // Exactly one path claims the entry.
            assert!(answered != (expired == 1), "both or neither path claimed");

            let outcome = rx.await.unwrap();
            if answered {
                assert_eq!(
                    outcome,
                    CorrelationOutcome::Answered {
                        payload: b"won".to_vec()
                    }
                );
            } else {
                assert_eq!(outcome, CorrelationOutcome::Expired);
            }
        }
    }

    #[tokio::test]
    async fn test_background_sweeper_expires_requests() {
        let store = Arc::new(PendingRpcStore::new(Duration::from_millis(10)));
        let rx = store
            .register(SessionId::new(), CorrelationId::new(), None)
            .unwrap();

        let sweeper = tokio::spawn(cleanup_task(
            Arc::clone(&store),
            Duration::from_millis(5),
        ));

        assert_eq!(rx.await.unwrap(), CorrelationOutcome::Expired);
        assert_eq!(store.pending_count(), 0);
        sweeper.abort();
    }
}
