//! Fixed shader source fragments and composition of the final source lists.
//!
//! The harness owns everything around the user's fragment body: a common
//! header, the Shadertoy uniform declarations, and a footer that defines the
//! real entry point calling `mainImage`. The body is passed through verbatim;
//! syntax errors only surface at compile time.

pub const COMMON_HEADER: &str = "#version 100\nprecision highp float;";

pub const VERTEX_BODY: &str = "attribute vec4 iPosition;void main(){gl_Position=iPosition;}";

pub const FRAGMENT_UNIFORMS: &str = "\
uniform vec3 iResolution;\
uniform float iTime;\
uniform float iFrame;\
uniform float iChannelTime[4];\
uniform vec4 iMouse;\
uniform vec4 iDate;\
uniform float iSampleRate;\
uniform vec3 iChannelResolution[4];\
uniform sampler2D iChannel0;\
uniform sampler2D iChannel1;\
uniform sampler2D iChannel2;\
uniform sampler2D iChannel3;\n";

pub const FRAGMENT_FOOTER: &str = "\nvoid main(){mainImage(gl_FragColor,gl_FragCoord.xy);}";

/// Rendered when no `--source` file is supplied.
pub const DEFAULT_FRAGMENT_BODY: &str = "\
void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    vec2 uv = fragCoord / iResolution.xy;
    vec3 color = 0.5 + 0.5 * cos(iTime + uv.xyx + vec3(0.0, 2.0, 4.0));
    fragColor = vec4(color, 1.0);
}";

/// Ordered source fragments for the vertex stage.
pub fn vertex_sources() -> Vec<&'static str> {
    vec![COMMON_HEADER, VERTEX_BODY]
}

/// Ordered source fragments for the fragment stage. The fragments stay
/// separate so the compiler can be handed each one with its own length and
/// report line numbers relative to the fragment it came from.
pub fn fragment_sources(body: &str) -> Vec<&str> {
    vec![COMMON_HEADER, FRAGMENT_UNIFORMS, body, FRAGMENT_FOOTER]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_sources_are_header_then_body() {
        assert_eq!(vertex_sources(), vec![COMMON_HEADER, VERTEX_BODY]);
    }

    #[test]
    fn fragment_sources_keep_composition_order() {
        let body = "void mainImage(out vec4 c, in vec2 p) { c = vec4(1.0); }";
        let sources = fragment_sources(body);
        assert_eq!(
            sources,
            vec![COMMON_HEADER, FRAGMENT_UNIFORMS, body, FRAGMENT_FOOTER]
        );
    }

    #[test]
    fn user_body_is_passed_through_verbatim() {
        let body = "  // odd whitespace preserved \n\tvoid mainImage(out vec4 c, in vec2 p){c=vec4(0.);}\n";
        let sources = fragment_sources(body);
        assert_eq!(sources[2], body);
    }

    #[test]
    fn default_body_defines_the_entry_function() {
        assert!(DEFAULT_FRAGMENT_BODY.contains("mainImage"));
    }

    #[test]
    fn footer_invokes_the_entry_function() {
        assert!(FRAGMENT_FOOTER.contains("mainImage(gl_FragColor,gl_FragCoord.xy)"));
    }
}
