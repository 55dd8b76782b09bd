// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::pin::Pin;

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{ButtonRequest, FlowError, HostResponder, ok};

pub type PinnedRequestStream = Pin<Box<dyn Stream<Item = ButtonRequest> + Send>>;

/// Stand in for device firmware that sends a fixed list of requests.
pub fn gen_request_stream(generator_vec: Vec<ButtonRequest>) -> PinnedRequestStream {
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// Send every request of `requests` to `host`, waiting for each ack. Stops at the first
/// error. Returns the number of requests acknowledged.
///
/// # Errors
///
/// The first error of [`HostResponder::on_button_request`].
pub async fn feed_requests(
    host: &mut HostResponder,
    mut requests: PinnedRequestStream,
) -> Result<usize, FlowError> {
    let mut acked = 0;
    while let Some(request) = requests.next().await {
        host.on_button_request(request).await?;
        acked += 1;
    }
    ok!(acked)
}
