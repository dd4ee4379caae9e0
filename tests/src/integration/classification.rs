//! # Classification Integration Flows
//!
//! Verifies the taxonomy contract from the outside: every kind is
//! reachable from at least one transport decode rule, the
//! stimulus/bookkeeping split is exactly the documented four kinds, and
//! the dispatcher honors the split end to end.

#[cfg(test)]
mod tests {
    use hub_transport::coap::{
        CoapMethod, CoapOutbound, CoapRequest, ObserveOption, ObservedResource,
    };
    use hub_transport::mqtt::{self, Direction, MqttFrame};
    use hub_transport::coap;
    use shared_types::{CorrelationId, MsgKind, SessionId};
    use std::collections::HashSet;

    /// Every MQTT frame shape the decode path accepts, paired per
    /// direction.
    fn mqtt_frames() -> Vec<(Direction, MqttFrame)> {
        let id = CorrelationId::new();
        let publish = |topic: String| MqttFrame::Publish {
            topic,
            payload: b"{}".to_vec(),
        };

        vec![
            (Direction::FromDevice, MqttFrame::Connect),
            (Direction::FromDevice, MqttFrame::Disconnect),
            (
                Direction::FromDevice,
                MqttFrame::Subscribe {
                    topic_filter: mqtt::ATTRIBUTES_TOPIC.to_string(),
                },
            ),
            (
                Direction::FromDevice,
                MqttFrame::Unsubscribe {
                    topic_filter: mqtt::ATTRIBUTES_TOPIC.to_string(),
                },
            ),
            (
                Direction::FromDevice,
                MqttFrame::Subscribe {
                    topic_filter: mqtt::RPC_SUBSCRIBE_FILTER.to_string(),
                },
            ),
            (
                Direction::FromDevice,
                MqttFrame::Unsubscribe {
                    topic_filter: mqtt::RPC_SUBSCRIBE_FILTER.to_string(),
                },
            ),
            (Direction::FromDevice, publish(mqtt::TELEMETRY_TOPIC.to_string())),
            (Direction::FromDevice, publish(mqtt::ATTRIBUTES_TOPIC.to_string())),
            (Direction::ToDevice, publish(mqtt::ATTRIBUTES_TOPIC.to_string())),
            (Direction::ToDevice, publish(mqtt::ERRORS_TOPIC.to_string())),
            (
                Direction::FromDevice,
                publish(format!("{}{id}", mqtt::ATTRIBUTES_REQUEST_PREFIX)),
            ),
            (
                Direction::ToDevice,
                publish(format!("{}{id}", mqtt::ATTRIBUTES_RESPONSE_PREFIX)),
            ),
            (
                Direction::FromDevice,
                publish(format!("{}{id}", mqtt::RPC_REQUEST_PREFIX)),
            ),
            (
                Direction::ToDevice,
                publish(format!("{}{id}", mqtt::RPC_REQUEST_PREFIX)),
            ),
            (
                Direction::FromDevice,
                publish(format!("{}{id}", mqtt::RPC_RESPONSE_PREFIX)),
            ),
            (
                Direction::ToDevice,
                publish(format!("{}{id}", mqtt::RPC_RESPONSE_PREFIX)),
            ),
            (Direction::ToDevice, MqttFrame::PubAck { correlation_id: id }),
        ]
    }

    fn coap_request(
        method: CoapMethod,
        segments: &[&str],
        observe: Option<ObserveOption>,
        correlation_id: Option<CorrelationId>,
    ) -> CoapRequest {
        CoapRequest {
            method,
            path: segments.iter().map(|s| (*s).to_string()).collect(),
            observe,
            correlation_id,
            payload: b"{}".to_vec(),
        }
    }

    /// Every CoAP exchange shape the decode paths accept.
    fn coap_kinds(session: SessionId) -> Vec<MsgKind> {
        let id = CorrelationId::new();
        let id_str = id.to_string();

        let requests = vec![
            coap_request(CoapMethod::Post, &["api", "v1", "telemetry"], None, None),
            coap_request(CoapMethod::Get, &["api", "v1", "attributes"], None, Some(id)),
            coap_request(CoapMethod::Post, &["api", "v1", "attributes"], None, None),
            coap_request(
                CoapMethod::Get,
                &["api", "v1", "attributes"],
                Some(ObserveOption::Register),
                None,
            ),
            coap_request(
                CoapMethod::Get,
                &["api", "v1", "attributes"],
                Some(ObserveOption::Deregister),
                None,
            ),
            coap_request(
                CoapMethod::Get,
                &["api", "v1", "rpc"],
                Some(ObserveOption::Register),
                None,
            ),
            coap_request(
                CoapMethod::Get,
                &["api", "v1", "rpc"],
                Some(ObserveOption::Deregister),
                None,
            ),
            coap_request(CoapMethod::Post, &["api", "v1", "rpc"], None, Some(id)),
            coap_request(CoapMethod::Post, &["api", "v1", "rpc", &id_str], None, None),
        ];

        let outbounds = vec![
            CoapOutbound::Response {
                request_kind: MsgKind::GetAttributesRequest,
                payload: b"{\"v\":1}".to_vec(),
            },
            CoapOutbound::Response {
                request_kind: MsgKind::ToServerRpcRequest,
                payload: b"{\"v\":1}".to_vec(),
            },
            CoapOutbound::Response {
                request_kind: MsgKind::PostTelemetry,
                payload: Vec::new(),
            },
            CoapOutbound::Notification {
                resource: ObservedResource::Attributes,
                correlation_id: None,
                payload: Vec::new(),
            },
            CoapOutbound::Notification {
                resource: ObservedResource::Rpc,
                correlation_id: Some(id),
                payload: Vec::new(),
            },
        ];

        let mut kinds = Vec::new();
        for request in requests {
            kinds.push(coap::decode_request(session, request).unwrap().kind);
        }
        for outbound in outbounds {
            kinds.push(coap::decode_outbound(session, outbound).unwrap().kind);
        }
        kinds
    }

    #[test]
    fn test_taxonomy_is_total() {
        assert_eq!(MsgKind::ALL.len(), 18);

        let names: HashSet<&str> = MsgKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), 18, "wire names must be distinct");
    }

    #[test]
    fn test_rule_processing_split_is_exactly_four() {
        let stimulus: Vec<MsgKind> = MsgKind::ALL
            .into_iter()
            .filter(|k| k.requires_rule_processing())
            .collect();

        assert_eq!(
            stimulus,
            vec![
                MsgKind::GetAttributesRequest,
                MsgKind::PostAttributesRequest,
                MsgKind::PostTelemetry,
                MsgKind::ToServerRpcRequest,
            ]
        );
    }

    #[test]
    fn test_every_kind_reachable_from_some_decode_rule() {
        let session = SessionId::new();
        let mut reachable: HashSet<MsgKind> = HashSet::new();

        for (direction, frame) in mqtt_frames() {
            reachable.insert(mqtt::decode(session, direction, frame).unwrap().kind);
        }
        reachable.extend(coap_kinds(session));

        let all: HashSet<MsgKind> = MsgKind::ALL.into_iter().collect();
        assert_eq!(reachable, all);
    }

    #[test]
    fn test_status_code_response_is_coap_only() {
        let session = SessionId::new();

        let mqtt_reachable: HashSet<MsgKind> = mqtt_frames()
            .into_iter()
            .map(|(direction, frame)| mqtt::decode(session, direction, frame).unwrap().kind)
            .collect();

        assert!(!mqtt_reachable.contains(&MsgKind::StatusCodeResponse));
        assert!(coap_kinds(session).contains(&MsgKind::StatusCodeResponse));
    }

    #[test]
    fn test_wire_names_round_trip() {
        for kind in MsgKind::ALL {
            let parsed: MsgKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("not-a-kind".parse::<MsgKind>().is_err());
    }
}
