#[cfg(test)]
mod tests {
    use crate::message::*;
    use proptest::collection::btree_map;
    use proptest::option;
    use proptest::prelude::*;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn target_type() -> impl Strategy<Value = TargetType> {
        prop_oneof![
            Just(TargetType::Token),
            Just(TargetType::Topic),
            Just(TargetType::Condition),
        ]
    }

    fn notification() -> impl Strategy<Value = Notification> {
        (
            option::of(".{0,16}"),
            option::of(".{0,32}"),
            option::of("https://[a-z]{1,8}\\.com/[a-z]{1,8}\\.png"),
        )
            .prop_map(|(title, body, image)| Notification { title, body, image })
    }

    fn string_map() -> impl Strategy<Value = Option<BTreeMap<String, String>>> {
        option::of(btree_map("[a-zA-Z-]{1,8}", ".{0,16}", 0..4))
    }

    // Integers, strings and booleans only: floats would not compare equal after a round trip.
    fn json_object() -> impl Strategy<Value = JsonObject> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(Value::from),
            ".{0,12}".prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ];
        let value = leaf.prop_recursive(2, 8, 3, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
                btree_map("[a-z]{1,6}", inner, 0..3)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        });
        btree_map("[a-z-]{1,8}", value, 0..4).prop_map(|map| map.into_iter().collect())
    }

    // Quarter steps are exact in f32 and survive the JSON round trip.
    fn channel() -> impl Strategy<Value = Option<f32>> {
        option::of((0u8..=4).prop_map(|step| f32::from(step) * 0.25))
    }

    fn light_settings() -> impl Strategy<Value = LightSettings> {
        (
            option::of((channel(), channel(), channel(), channel())),
            option::of("[0-9]{1,3}s"),
            option::of("[0-9]{1,3}\\.[0-9]{1,3}s"),
        )
            .prop_map(|(color, light_on_duration, light_off_duration)| LightSettings {
                color: color.map(|(red, green, blue, alpha)| Color {
                    red,
                    green,
                    blue,
                    alpha,
                }),
                light_on_duration,
                light_off_duration,
            })
    }

    // Unknown values are kept clear of every known name and alias.
    fn unknown_value() -> impl Strategy<Value = String> {
        "FUTURE_[A-Z]{1,8}"
    }

    fn android_priority() -> impl Strategy<Value = AndroidMessagePriority> {
        prop_oneof![
            Just(AndroidMessagePriority::Normal),
            Just(AndroidMessagePriority::High),
            unknown_value().prop_map(AndroidMessagePriority::Other),
        ]
    }

    fn notification_priority() -> impl Strategy<Value = NotificationPriority> {
        prop_oneof![
            Just(NotificationPriority::Unspecified),
            Just(NotificationPriority::Min),
            Just(NotificationPriority::Low),
            Just(NotificationPriority::Default),
            Just(NotificationPriority::High),
            Just(NotificationPriority::Max),
            unknown_value().prop_map(NotificationPriority::Other),
        ]
    }

    fn visibility() -> impl Strategy<Value = Visibility> {
        prop_oneof![
            Just(Visibility::Unspecified),
            Just(Visibility::Private),
            Just(Visibility::Public),
            Just(Visibility::Secret),
            unknown_value().prop_map(Visibility::Other),
        ]
    }

    fn proxy() -> impl Strategy<Value = Proxy> {
        prop_oneof![
            Just(Proxy::Unspecified),
            Just(Proxy::Allow),
            Just(Proxy::Deny),
            Just(Proxy::IfPriorityLowered),
            unknown_value().prop_map(Proxy::Other),
        ]
    }

    fn android_notification() -> impl Strategy<Value = AndroidNotification> {
        (
            option::of(".{0,16}"),
            option::of("[a-z_]{1,10}"),
            option::of(proptest::collection::vec(".{0,8}", 0..3)),
            option::of(proptest::collection::vec(".{0,8}", 0..3)),
            option::of(proptest::collection::vec("[0-9]{1,2}s", 0..4)),
            option::of(notification_priority()),
            option::of(visibility()),
            option::of(proxy()),
            option::of(any::<i32>()),
            option::of(light_settings()),
            option::of(any::<bool>()),
            option::of("#[0-9a-f]{6}"),
        )
            .prop_map(
                |(
                    title,
                    channel_id,
                    body_loc_args,
                    title_loc_args,
                    vibrate_timings,
                    notification_priority,
                    visibility,
                    proxy,
                    notification_count,
                    light_settings,
                    sticky,
                    color,
                )| AndroidNotification {
                    title,
                    channel_id,
                    body_loc_args,
                    title_loc_args,
                    vibrate_timings,
                    notification_priority,
                    visibility,
                    proxy,
                    notification_count,
                    light_settings,
                    sticky,
                    color,
                    ..Default::default()
                },
            )
    }

    fn android() -> impl Strategy<Value = AndroidConfig> {
        (
            option::of("[a-z_]{1,10}"),
            option::of(android_priority()),
            option::of(0..86_400u64),
            option::of(any::<bool>()),
            string_map(),
            option::of(android_notification()),
        )
            .prop_map(|(collapse_key, priority, ttl, direct_boot_ok, data, notification)| {
                let config = AndroidConfig {
                    collapse_key,
                    priority,
                    direct_boot_ok,
                    data,
                    notification,
                    ..Default::default()
                };
                match ttl {
                    Some(secs) => config.with_ttl(std::time::Duration::from_secs(secs)),
                    None => config,
                }
            })
    }

    fn webpush() -> impl Strategy<Value = WebpushConfig> {
        (
            string_map(),
            string_map(),
            option::of(json_object()),
            option::of((
                option::of("https://[a-z]{1,8}\\.com/[a-z]{0,8}"),
                option::of("[a-z-]{1,12}"),
            )),
        )
            .prop_map(|(headers, data, notification, fcm_options)| WebpushConfig {
                headers,
                data,
                notification,
                fcm_options: fcm_options
                    .map(|(link, analytics_label)| WebpushFcmOptions { link, analytics_label }),
            })
    }

    fn apns() -> impl Strategy<Value = ApnsConfig> {
        (
            string_map(),
            option::of(json_object()),
            option::of((
                option::of("[a-z-]{1,12}"),
                option::of("https://[a-z]{1,8}\\.com/[a-z]{1,8}\\.png"),
            )),
        )
            .prop_map(|(headers, payload, fcm_options)| ApnsConfig {
                headers,
                payload,
                fcm_options: fcm_options
                    .map(|(analytics_label, image)| ApnsFcmOptions { analytics_label, image }),
            })
    }

    // At least one of data / notification is always present.
    fn valid_message() -> impl Strategy<Value = Message> {
        (
            option::of("projects/[a-z]{1,8}/messages/[0-9]{1,6}"),
            option::of(btree_map(".{1,8}", ".{0,16}", 0..4)),
            option::of(notification()),
            option::of(android()),
            option::of(webpush()),
            option::of(apns()),
            option::of(option::of("[a-z-]{1,12}")),
            target_type(),
            "[A-Za-z0-9:_-]{1,32}",
        )
            .prop_filter("needs a payload", |(_, data, notification, ..)| {
                data.is_some() || notification.is_some()
            })
            .prop_map(
                |(name, data, notification, android, webpush, apns, label, target_type, target)| {
                    Message {
                        name,
                        data,
                        notification,
                        android,
                        webpush,
                        apns,
                        fcm_options: label.map(|analytics_label| FcmOptions { analytics_label }),
                        ..Default::default()
                    }
                    .set_target(target_type, target)
                },
            )
    }

    proptest! {
        #[test]
        fn test_round_trip_preserves_fields(message in valid_message()) {
            let json = message.to_json().expect("generated messages are valid");
            let parsed = Message::from_json(&json).expect("own output must parse");
            prop_assert_eq!(parsed, message);
        }

        #[test]
        fn test_set_target_is_pure(
            message in valid_message(),
            new_type in target_type(),
            value in "[a-z0-9]{1,16}",
        ) {
            let before = message.clone();
            let retargeted = message.set_target(new_type, value.clone());

            prop_assert_eq!(&message, &before);
            prop_assert_eq!(&retargeted.target, &Some(Target::new(new_type, value)));

            let set = [retargeted.token(), retargeted.topic(), retargeted.condition()]
                .iter()
                .filter(|t| t.is_some())
                .count();
            prop_assert_eq!(set, 1);
        }

        #[test]
        fn test_untargeted_messages_never_export(message in valid_message()) {
            let untargeted = Message { target: None, ..message };
            prop_assert!(untargeted.to_json().is_err());
            prop_assert!(untargeted.to_request_body().is_err());
        }
    }
}
