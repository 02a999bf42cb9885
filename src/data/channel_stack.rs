use crate::error::ChannelError;
use crate::types::Channel;

/// Ordered channels of equal shape, the output of [crate::ChannelComputer]
///
/// Order is significant: feature definitions refer to channels by their index.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelStack {
    channels: Vec<Channel>,
    names: Vec<String>,
}

impl ChannelStack {
    /// Stack of unnamed channels, names are `channel_0`, `channel_1`, ...
    pub fn new(channels: Vec<Channel>) -> Result<Self, ChannelError> {
        let names = (0..channels.len()).map(|i| format!("channel_{i}")).collect();
        Self::with_names(channels, names)
    }

    pub fn with_names(channels: Vec<Channel>, names: Vec<String>) -> Result<Self, ChannelError> {
        let first = channels.first().ok_or(ChannelError::EmptyStack)?;
        let expected = first.dim();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.dim() != expected)
        {
            return Err(ChannelError::ShapeMismatch {
                index,
                expected,
                actual: channel.dim(),
            });
        }
        if names.len() != channels.len() {
            return Err(ChannelError::NamesCountMismatch {
                channels: channels.len(),
                names: names.len(),
            });
        }
        Ok(Self { channels, names })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false, a stack holds at least one channel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.channels[0].nrows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.channels[0].ncols()
    }

    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Append channels computed elsewhere, e.g. to fill reserved channel slots
    pub fn extend(
        &mut self,
        channels: impl IntoIterator<Item = (String, Channel)>,
    ) -> Result<(), ChannelError> {
        let expected = (self.rows(), self.cols());
        let (names, channels): (Vec<_>, Vec<_>) = channels.into_iter().unzip();
        if let Some((i, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.dim() != expected)
        {
            return Err(ChannelError::ShapeMismatch {
                index: self.channels.len() + i,
                expected,
                actual: channel.dim(),
            });
        }
        self.channels.extend(channels);
        self.names.extend(names);
        Ok(())
    }

    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }
}

impl AsRef<[Channel]> for ChannelStack {
    fn as_ref(&self) -> &[Channel] {
        &self.channels
    }
}

impl<'a> IntoIterator for &'a ChannelStack {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
