/// Enumerates the placeholder adapters.
///
/// Each entry is `(constructor, id constant, label, supports_voice, style)`.
macro_rules! palaver_for_each_stub_provider {
    ($mac:ident) => {
        $mac!(deepseek, DEEPSEEK, "DeepSeek", false, Echo);
        $mac!(claude, CLAUDE, "Claude", false, Echo);
        $mac!(pollinations, POLLINATIONS, "Pollinations", false, Echo);
        $mac!(elevenlabs, ELEVENLABS, "ElevenLabs", true, VoicePipeline);
        $mac!(vapi, VAPI, "Vapi", true, VoicePipeline);
        // Streaming avatar; answers like a text stub.
        $mac!(heygen, HEYGEN, "Heygen", true, Echo);
    };
}
