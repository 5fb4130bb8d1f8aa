mod tests {
    use rgb_lamp_engine::{
        IntentChannel, IntentProcessor, LampIntent, PatternId,
        channel::{Channel, TryReceiveError, TrySendError},
    };

    #[test]
    fn test_bounded_fifo() {
        let channel = Channel::<u8, 2>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();
        assert!(channel.is_empty());

        assert_eq!(sender.try_send(1), Ok(()));
        assert_eq!(sender.try_send(2), Ok(()));
        assert_eq!(sender.try_send(3), Err(TrySendError(3)));
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive(), Ok(1));
        assert_eq!(receiver.try_receive(), Ok(2));
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_drain_is_bounded() {
        let channel = Channel::<u8, 3>::new();
        for i in 0..3 {
            channel.try_send(i).unwrap();
        }
        let drained: Vec<u8> = channel.receiver().drain().collect();
        assert_eq!(drained, vec![0, 1, 2]);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_intents_taken_in_order() {
        let channel = IntentChannel::<4>::new();
        let sender = channel.sender();
        sender.try_send(LampIntent::Power(false)).unwrap();
        sender.try_send(LampIntent::Mode(PatternId::Clock)).unwrap();

        let mut processor = IntentProcessor::new(channel.receiver());
        let pending = processor.take_pending();
        assert_eq!(pending.len(), 2);
        assert!(matches!(pending[0], LampIntent::Power(false)));
        assert!(matches!(pending[1], LampIntent::Mode(PatternId::Clock)));
        assert!(processor.take_pending().is_empty());
    }
}
