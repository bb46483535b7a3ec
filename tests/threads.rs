//! A producer and a consumer thread share one buffer, standing in for an
//! interrupt handler and the main loop.

use std::thread;

use byte_ring::RingBuffer;

const TOTAL: usize = 20_000;

fn byte_at(i: usize) -> u8 {
    (i % 251) as u8
}

#[test]
fn single_bytes_arrive_in_order() {
    let mut storage = [0u8; 7];
    let buffer = RingBuffer::with_storage(&mut storage);

    let received = thread::scope(|s| {
        s.spawn(|| {
            for i in 0..TOTAL {
                while buffer.push_back(byte_at(i)).is_err() {
                    thread::yield_now();
                }
            }
        });

        let consumer = s.spawn(|| {
            let mut received = Vec::with_capacity(TOTAL);
            while received.len() < TOTAL {
                match buffer.pop_front() {
                    Some(byte) => received.push(byte),
                    None => thread::yield_now(),
                }
            }
            received
        });

        consumer.join().unwrap()
    });

    assert!(received.iter().enumerate().all(|(i, &b)| b == byte_at(i)));
    assert!(buffer.is_empty());
}

#[test]
fn bulk_writes_are_never_torn() {
    let mut storage = [0u8; 13];
    let buffer = RingBuffer::with_storage(&mut storage);
    let chunks = TOTAL / 5;

    let received = thread::scope(|s| {
        s.spawn(|| {
            for chunk in 0..chunks {
                let bytes: Vec<u8> = (chunk * 5..chunk * 5 + 5).map(byte_at).collect();
                while buffer.push_back_slice(&bytes).is_err() {
                    thread::yield_now();
                }
            }
        });

        let consumer = s.spawn(|| {
            let mut received = Vec::with_capacity(TOTAL);
            while received.len() < chunks * 5 {
                // A reader only ever sees whole chunks
                let len = buffer.len();
                assert_eq!(len % 5, 0);
                if len == 0 {
                    thread::yield_now();
                    continue;
                }
                for offset in 0..5 {
                    received.push(buffer.peek_at(offset).unwrap());
                }
                buffer.discard_front(5);
            }
            received
        });

        consumer.join().unwrap()
    });

    assert_eq!(received.len(), chunks * 5);
    assert!(received.iter().enumerate().all(|(i, &b)| b == byte_at(i)));
}
