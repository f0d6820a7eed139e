//! GLSL sources for the variants that embed their shaders.
//!
//! All shaders target GLSL 3.30 core, matching the 3.3 core context. The
//! textured variant reads its shaders from disk instead (see
//! `assets/shaders/textured.{vert,frag}`).

/// Passes a `vec3` position straight through to clip space.
///
/// # Attributes
///
/// | Location | Name    | Type   |
/// |----------|---------|--------|
/// | 0        | `a_pos` | `vec3` |
pub const POSITION_VERTEX_SRC: &str = r"#version 330 core
layout (location = 0) in vec3 a_pos;

void main() {
    gl_Position = vec4(a_pos.x, a_pos.y, a_pos.z, 1.0);
}
";

/// Fills every fragment with a constant orange.
pub const ORANGE_FRAGMENT_SRC: &str = r"#version 330 core
out vec4 frag_color;

void main() {
    frag_color = vec4(1.0, 0.5, 0.2, 1.0);
}
";

/// Fills every fragment with the `u_color` uniform.
///
/// # Uniforms
///
/// | Name      | Type   | Description     |
/// |-----------|--------|-----------------|
/// | `u_color` | `vec4` | RGBA fill color |
pub const UNIFORM_COLOR_FRAGMENT_SRC: &str = r"#version 330 core
out vec4 frag_color;

uniform vec4 u_color;

void main() {
    frag_color = u_color;
}
";

/// Forwards a per-vertex color to the fragment stage.
///
/// # Attributes
///
/// | Location | Name      | Type   |
/// |----------|-----------|--------|
/// | 0        | `a_pos`   | `vec3` |
/// | 1        | `a_color` | `vec3` |
pub const COLOR_VERTEX_SRC: &str = r"#version 330 core
layout (location = 0) in vec3 a_pos;
layout (location = 1) in vec3 a_color;

out vec3 v_color;

void main() {
    gl_Position = vec4(a_pos, 1.0);
    v_color = a_color;
}
";

/// Outputs the interpolated vertex color.
pub const COLOR_FRAGMENT_SRC: &str = r"#version 330 core
in vec3 v_color;

out vec4 frag_color;

void main() {
    frag_color = vec4(v_color, 1.0);
}
";

/// File name of the textured variant's vertex shader inside the shader
/// directory.
pub const TEXTURED_VERTEX_FILE: &str = "textured.vert";
/// File name of the textured variant's fragment shader.
pub const TEXTURED_FRAGMENT_FILE: &str = "textured.frag";
